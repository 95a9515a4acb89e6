//! Pagination links for collection responses

use crate::core::Page;
use crate::core::error::ApiResult;
use crate::links::format::LinkFormatter;
use crate::links::rels;
use indexmap::IndexMap;
use url::Url;

/// Builds the `self`, `prev` and `next` links of a collection page
///
/// The request URI is rebuilt from the base URI, the request path and the
/// raw query string. Every query parameter except `page` is preserved;
/// `page` is removed and appended again with the target page number.
#[derive(Debug, Clone)]
pub struct PagingLinkBuilder {
    formatter: LinkFormatter,
}

impl PagingLinkBuilder {
    pub fn new(formatter: LinkFormatter) -> Self {
        Self { formatter }
    }

    /// Relation name to absolute URI, in `self`, `prev`, `next` order
    ///
    /// Absent relations are omitted.
    pub fn build<T>(
        &self,
        page: &Page<T>,
        path: &str,
        query: Option<&str>,
    ) -> ApiResult<IndexMap<&'static str, String>> {
        let mut request_uri = Url::parse(&self.formatter.absolute(path))?;
        request_uri.set_query(query.filter(|q| !q.is_empty()));

        let mut links = IndexMap::new();
        links.insert(rels::SELF, with_page(&request_uri, page.number));

        let total_pages = page.total_pages();
        if page.has_previous() && total_pages > 0 {
            let previous = page.previous_index().min(total_pages - 1);
            links.insert(rels::PREV, with_page(&request_uri, previous));
        }

        if page.has_next() {
            links.insert(rels::NEXT, with_page(&request_uri, page.next_index()));
        }

        Ok(links)
    }

    /// Same as [`build`](Self::build), formatted as `Link` header values
    pub fn header_values<T>(
        &self,
        page: &Page<T>,
        path: &str,
        query: Option<&str>,
    ) -> ApiResult<Vec<String>> {
        Ok(self
            .build(page, path, query)?
            .into_iter()
            .map(|(rel, uri)| self.formatter.link(&uri, rel))
            .collect())
    }
}

fn with_page(uri: &Url, page: usize) -> String {
    let retained: Vec<(String, String)> = uri
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut uri = uri.clone();
    uri.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string());
    uri.to_string()
}
