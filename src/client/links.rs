//! Reading `Link` headers on the client side

use super::{ClientError, ClientResult};
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, LINK};
use std::fmt::Display;

/// Relation name to URI, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: IndexMap<String, String>,
}

impl LinkSet {
    /// Collect every well-formed `Link` header of a response
    ///
    /// Values that are not `<uri>; rel="name"` are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let links = headers
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(parse_link)
            .map(|(uri, rel)| (rel, uri))
            .collect();
        Self { links }
    }

    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Like [`get`](Self::get), failing with [`ClientError::MissingLink`]
    pub fn require(&self, rel: &str) -> ClientResult<&str> {
        self.get(rel).ok_or_else(|| ClientError::MissingLink {
            rel: rel.to_string(),
        })
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Split one `<uri>; rel="name"` header value into `(uri, rel)`
pub fn parse_link(value: &str) -> Option<(String, String)> {
    let (target, params) = value.split_once(';')?;
    let uri = target.trim().strip_prefix('<')?.strip_suffix('>')?;
    let rel = params
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("rel="))?
        .trim_matches('"');

    if rel.is_empty() {
        return None;
    }
    Some((uri.to_string(), rel.to_string()))
}

/// Fill the `{placeholder}` of a templated link
pub fn expand_template(template: &str, placeholder: &str, value: impl Display) -> String {
    template.replace(&format!("{{{}}}", placeholder), &value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_link() {
        assert_eq!(
            parse_link("<http://localhost:8080/modules>; rel=\"getStudyModulesCollection\""),
            Some((
                "http://localhost:8080/modules".to_string(),
                "getStudyModulesCollection".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_link_rejects_malformed_values() {
        assert_eq!(parse_link("http://localhost:8080/modules"), None);
        assert_eq!(parse_link("http://localhost:8080/modules; rel=\"x\""), None);
        assert_eq!(parse_link("<http://localhost:8080/modules>; title=\"x\""), None);
        assert_eq!(parse_link("<http://localhost:8080/modules>; rel=\"\""), None);
    }

    #[test]
    fn test_link_set_keeps_header_order() {
        let mut headers = HeaderMap::new();
        headers.append(
            LINK,
            HeaderValue::from_static("<http://localhost:8080/universities/1>; rel=\"putUpdateUniversity\""),
        );
        headers.append(LINK, HeaderValue::from_static("garbage"));
        headers.append(
            LINK,
            HeaderValue::from_static("<http://localhost:8080/universities/1>; rel=\"delUniversity\""),
        );

        let links = LinkSet::from_headers(&headers);
        assert_eq!(
            links.rels().collect::<Vec<_>>(),
            vec!["putUpdateUniversity", "delUniversity"]
        );
        assert_eq!(
            links.get("delUniversity"),
            Some("http://localhost:8080/universities/1")
        );
        assert!(matches!(
            links.require("getSelf"),
            Err(ClientError::MissingLink { rel }) if rel == "getSelf"
        ));
    }

    #[test]
    fn test_expand_template() {
        assert_eq!(
            expand_template(
                "http://localhost:8080/universities/1/modules/{moduleId}",
                "moduleId",
                7
            ),
            "http://localhost:8080/universities/1/modules/7"
        );
    }
}
