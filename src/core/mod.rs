//! Core module containing fundamental traits and types

pub mod entity;
pub mod error;
pub mod extractors;
pub mod ids;
pub mod query;
pub mod repository;
pub mod sort;
pub mod validation;

pub use entity::Entity;
pub use error::{ApiError, ApiResult, LinkAccess, LinkError, ResourceError, ValidationError};
pub use ids::IdAllocator;
pub use query::{CollectionParams, Page, PageRequest};
pub use repository::{Created, Repository, Upsert};
pub use sort::{Filter, SortSpec, Sortable};
