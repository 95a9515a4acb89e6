//! Query parameters and pagination utilities

use serde::Deserialize;

/// Query parameters of a collection request
///
/// Extracted from the URL query string. Every parameter is optional.
///
/// # Example
/// ```text
/// GET /universities?name=tech&country=germany&page=1&sort=name_desc
/// GET /modules?semester=spring
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CollectionParams {
    /// Case-insensitive substring of the name
    pub name: Option<String>,

    /// Case-insensitive substring of the country (universities only)
    pub country: Option<String>,

    /// Case-insensitive substring of the semester (modules only)
    pub semester: Option<String>,

    /// Zero-based page number; negative values are clamped to 0
    pub page: Option<i64>,

    /// Sort expression, `field_direction`
    pub sort: Option<String>,
}

/// A request for one page of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number
    pub number: usize,
    /// Number of items per page (at least 1)
    pub size: usize,
}

impl PageRequest {
    pub fn new(number: i64, size: usize) -> Self {
        Self {
            number: usize::try_from(number).unwrap_or(0),
            size: size.max(1),
        }
    }

    /// Index of the first element of this page
    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }
}

/// One page of a collection together with its paging metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items of this page
    pub content: Vec<T>,
    /// Zero-based page number that was requested
    pub number: usize,
    /// Requested page size
    pub size: usize,
    /// Number of items in the whole (filtered) collection
    pub total_elements: usize,
}

impl<T> Page<T> {
    /// Cut one page out of an already filtered and sorted collection
    pub fn from_sorted(items: Vec<T>, request: PageRequest) -> Self {
        let total_elements = items.len();
        let content = items
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Self {
            content,
            number: request.number,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.total_elements == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size.max(1))
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages()
    }

    /// Page number of the previous page, or 0 on the first page
    pub fn previous_index(&self) -> usize {
        self.number.saturating_sub(1)
    }

    /// Page number of the next page, or the current one on the last page
    pub fn next_index(&self) -> usize {
        if self.has_next() {
            self.number + 1
        } else {
            self.number
        }
    }

    /// Transform the items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_negative_page() {
        let request = PageRequest::new(-3, 10);
        assert_eq!(request.number, 0);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_request_minimum_size() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::from_sorted((1..=25).collect::<Vec<i32>>(), PageRequest::new(1, 10));
        assert_eq!(page.content, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(page.has_next());
        assert_eq!(page.previous_index(), 0);
        assert_eq!(page.next_index(), 2);
    }

    #[test]
    fn test_empty_page() {
        let page = Page::from_sorted(Vec::<i32>::new(), PageRequest::new(0, 10));
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_beyond_the_end() {
        let page = Page::from_sorted((1..=15).collect::<Vec<i32>>(), PageRequest::new(5, 10));
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.previous_index(), 4);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::from_sorted(vec![1, 2, 3], PageRequest::new(0, 2)).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 3);
    }
}
