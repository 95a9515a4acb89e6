//! Hypermedia client for the API
//!
//! The client hard-codes a single URI, the dispatcher. Everything else is
//! discovered: URIs come from `Link` headers, `Location` headers and the
//! `self` field of collection items.
//!
//! ```rust,ignore
//! let client = HypermediaClient::new("http://localhost:8080/");
//! let entry = client.dispatcher().await?;
//!
//! let created = client
//!     .create(entry.require(rels::POST_CREATE_UNIVERSITY)?, &university)
//!     .await?;
//! let fetched = client.follow_location(&created).await?;
//! client
//!     .update(fetched.links.require(rels::PUT_UPDATE_UNIVERSITY)?, &changed)
//!     .await?;
//! ```

pub mod links;

pub use links::{LinkSet, expand_template, parse_link};

use indexmap::IndexMap;
use reqwest::header::LOCATION;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors of the hypermedia client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{method} {uri} answered {status}: {body}")]
    UnexpectedStatus {
        method: Method,
        uri: String,
        status: StatusCode,
        body: String,
    },

    #[error("Response has no '{rel}' link")]
    MissingLink { rel: String },

    #[error("Response has no Location header")]
    MissingLocation,

    #[error("Collection item is missing its '{field}' field")]
    MalformedItem { field: &'static str },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// What the client keeps of a response
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub links: LinkSet,
    pub location: Option<String>,
    pub body: Option<Value>,
}

/// One page of a collection
#[derive(Debug, Clone)]
pub struct CollectionPage {
    /// `self` URI of every item on the page, by id
    pub items: IndexMap<i64, String>,
    /// Paging links (`self`, `prev`, `next`)
    pub links: LinkSet,
}

pub struct HypermediaClient {
    http: Client,
    dispatcher_uri: String,
}

impl HypermediaClient {
    pub fn new(dispatcher_uri: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), dispatcher_uri)
    }

    pub fn with_http_client(http: Client, dispatcher_uri: impl Into<String>) -> Self {
        Self {
            http,
            dispatcher_uri: dispatcher_uri.into(),
        }
    }

    /// Links advertised by the dispatcher
    pub async fn dispatcher(&self) -> ClientResult<LinkSet> {
        let uri = self.dispatcher_uri.clone();
        Ok(self.send(Method::GET, &uri, None::<&()>, &[StatusCode::OK]).await?.links)
    }

    /// GET a single resource
    pub async fn get(&self, uri: &str) -> ClientResult<Fetched> {
        self.send(Method::GET, uri, None::<&()>, &[StatusCode::OK])
            .await
    }

    /// GET one page of a collection
    pub async fn collection(&self, uri: &str) -> ClientResult<CollectionPage> {
        let fetched = self.get(uri).await?;

        let mut items = IndexMap::new();
        if let Some(Value::Array(entries)) = fetched.body {
            for entry in entries {
                let id = entry["id"]
                    .as_i64()
                    .ok_or(ClientError::MalformedItem { field: "id" })?;
                let self_uri = entry["self"]
                    .as_str()
                    .ok_or(ClientError::MalformedItem { field: "self" })?;
                items.insert(id, self_uri.to_string());
            }
        }

        Ok(CollectionPage {
            items,
            links: fetched.links,
        })
    }

    /// POST a new resource; the response carries its `Location`
    pub async fn create<B: Serialize + ?Sized>(&self, uri: &str, body: &B) -> ClientResult<Fetched> {
        let created = self
            .send(Method::POST, uri, Some(body), &[StatusCode::CREATED])
            .await?;
        if created.location.is_none() {
            return Err(ClientError::MissingLocation);
        }
        Ok(created)
    }

    /// PUT a resource: 204 when it was updated, 201 when it was created
    pub async fn update<B: Serialize + ?Sized>(&self, uri: &str, body: &B) -> ClientResult<Fetched> {
        self.send(
            Method::PUT,
            uri,
            Some(body),
            &[StatusCode::NO_CONTENT, StatusCode::CREATED],
        )
        .await
    }

    /// PUT without a body, as used to link a module
    pub async fn put(&self, uri: &str) -> ClientResult<Fetched> {
        self.send(Method::PUT, uri, None::<&()>, &[StatusCode::NO_CONTENT])
            .await
    }

    pub async fn delete(&self, uri: &str) -> ClientResult<Fetched> {
        self.send(Method::DELETE, uri, None::<&()>, &[StatusCode::NO_CONTENT])
            .await
    }

    /// GET the resource a previous response pointed to with `Location`
    pub async fn follow_location(&self, response: &Fetched) -> ClientResult<Fetched> {
        let location = response
            .location
            .as_deref()
            .ok_or(ClientError::MissingLocation)?;
        self.get(location).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        uri: &str,
        body: Option<&B>,
        expected: &[StatusCode],
    ) -> ClientResult<Fetched> {
        tracing::info!(%method, uri, "sending request");

        let mut request = self.http.request(method.clone(), uri);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!(%method, uri, status = status.as_u16(), "received response");

        let links = LinkSet::from_headers(response.headers());
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !expected.contains(&status) {
            return Err(ClientError::UnexpectedStatus {
                method,
                uri: uri.to_string(),
                status,
                body: text,
            });
        }

        let body = if text.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text)?)
        };

        Ok(Fetched {
            status,
            links,
            location,
            body,
        })
    }
}
