//! # Study Travel API
//!
//! A hypermedia REST API for managing partner universities and the study
//! modules offered at them.
//!
//! ## Features
//!
//! - **CRUD for universities and study modules** with upsert-style `PUT`
//! - **Hypermedia navigation**: a dispatcher at `/` and `Link` headers on
//!   every response advertising related and actionable URIs
//! - **Paging, filtering and sorting** of collections, with `self`/`prev`/`next` links
//! - **Module linking**: a study module belongs to at most one university;
//!   deleting a university deletes its modules
//! - **Id recycling**: ids freed by deletion are handed out again
//! - **Hypermedia client** that navigates the API from the dispatcher by
//!   following `Link` and `Location` headers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use studytravel::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ServerConfig::from_env()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, CollectionParams, Created, Entity, IdAllocator, LinkAccess,
        LinkError, Page, PageRequest, Repository, ResourceError, SortSpec, Upsert,
        ValidationError, validation::Validated,
    };

    // === Entities ===
    pub use crate::entities::{
        Semester, StudyModule, StudyModuleFilter, StudyModulePayload, University,
        UniversityFilter, UniversityPayload,
    };

    // === Links ===
    pub use crate::links::{LinkFormatter, LinkingService, PagingLinkBuilder, format_link, rels};

    // === Services ===
    pub use crate::services::{StudyModuleService, UniversityService};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Client ===
    pub use crate::client::{
        ClientError, CollectionPage, Fetched, HypermediaClient, LinkSet, expand_template,
    };

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost, build_routes};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
