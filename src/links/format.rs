//! `Link` header formatting

use crate::core::error::ApiResult;
use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderValue};

/// Format a single `Link` header value: `<uri>; rel="rel"`
pub fn format_link(uri: &str, rel: &str) -> String {
    format!("<{}>; rel=\"{}\"", uri, rel)
}

/// Resolves paths against the configured base URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFormatter {
    base_uri: String,
}

impl LinkFormatter {
    pub fn new(base_uri: impl Into<String>) -> Self {
        let base_uri: String = base_uri.into();
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Prefix paths starting with `/` with the base URI; anything else is
    /// taken as already absolute
    pub fn absolute(&self, uri: &str) -> String {
        if uri.starts_with('/') {
            format!("{}{}", self.base_uri, uri)
        } else {
            uri.to_string()
        }
    }

    /// Format a `Link` header value, resolving relative paths first
    pub fn link(&self, uri: &str, rel: &str) -> String {
        format_link(&self.absolute(uri), rel)
    }

    /// Start collecting `Link` headers for a response
    pub fn headers(&self) -> LinkHeaders<'_> {
        LinkHeaders {
            formatter: self,
            values: Vec::new(),
        }
    }
}

/// Ordered collection of `Link` header values for one response
#[derive(Debug)]
pub struct LinkHeaders<'a> {
    formatter: &'a LinkFormatter,
    values: Vec<String>,
}

impl LinkHeaders<'_> {
    /// Add a link to a path or absolute URI
    pub fn add(mut self, uri: &str, rel: &str) -> Self {
        self.values.push(self.formatter.link(uri, rel));
        self
    }

    /// Add already formatted header values
    pub fn extend(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.values.extend(values);
        self
    }

    /// One `Link` header per value, in insertion order
    pub fn into_header_map(self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for value in self.values {
            headers.append(LINK, HeaderValue::try_from(value)?);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_link() {
        assert_eq!(
            format_link("http://localhost:8080/universities", "getUniversitiesCollection"),
            "<http://localhost:8080/universities>; rel=\"getUniversitiesCollection\""
        );
    }

    #[test]
    fn test_relative_paths_get_the_base() {
        let links = LinkFormatter::new("http://localhost:8080/");
        assert_eq!(links.base_uri(), "http://localhost:8080");
        assert_eq!(
            links.link("/modules/3", "getSelf"),
            "<http://localhost:8080/modules/3>; rel=\"getSelf\""
        );
    }

    #[test]
    fn test_absolute_uris_are_kept() {
        let links = LinkFormatter::new("http://localhost:8080");
        assert_eq!(
            links.absolute("https://example.org/x?page=1"),
            "https://example.org/x?page=1"
        );
    }

    #[test]
    fn test_header_map_keeps_order() {
        let links = LinkFormatter::new("http://localhost:8080");
        let headers = links
            .headers()
            .add("/universities/1", "putUpdateUniversity")
            .add("/universities/1", "delUniversity")
            .into_header_map()
            .unwrap();

        let values: Vec<&str> = headers
            .get_all(LINK)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(
            values,
            vec![
                "<http://localhost:8080/universities/1>; rel=\"putUpdateUniversity\"",
                "<http://localhost:8080/universities/1>; rel=\"delUniversity\"",
            ]
        );
    }
}
