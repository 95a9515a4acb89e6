//! Hypermedia links and entity linking
//!
//! `format` and `paging` build the `Link` response headers; `service` owns the
//! association between study modules and universities.

pub mod format;
pub mod paging;
pub mod rels;
pub mod service;

pub use format::{LinkFormatter, LinkHeaders, format_link};
pub use paging::PagingLinkBuilder;
pub use service::LinkingService;
