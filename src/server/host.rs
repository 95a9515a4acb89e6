//! Server host holding the application state
//!
//! The host is the single source of truth shared by every handler: the
//! configuration, the link builders and the resource services.

use crate::config::ServerConfig;
use crate::core::{IdAllocator, Repository};
use crate::entities::{StudyModule, University};
use crate::links::{LinkFormatter, LinkingService, PagingLinkBuilder};
use crate::services::{StudyModuleService, UniversityService};
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(
///     ServerConfig::default(),
///     Arc::new(InMemoryRepository::new()),
///     Arc::new(InMemoryRepository::new()),
/// ));
/// let app = build_routes(host);
/// ```
pub struct ServerHost {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Resolves paths against the public base URI
    pub links: LinkFormatter,

    /// Pagination links for collection responses
    pub paging: PagingLinkBuilder,

    pub universities: Arc<UniversityService>,

    pub modules: Arc<StudyModuleService>,
}

impl ServerHost {
    /// Wire services, allocators and the linking service around two repositories
    pub fn new(
        config: ServerConfig,
        university_repository: Arc<dyn Repository<University>>,
        module_repository: Arc<dyn Repository<StudyModule>>,
    ) -> Self {
        let links = LinkFormatter::new(config.base_uri());
        let paging = PagingLinkBuilder::new(links.clone());

        let university_ids = Arc::new(IdAllocator::new());
        let module_ids = Arc::new(IdAllocator::new());

        let linking = Arc::new(LinkingService::new(
            university_repository.clone(),
            module_repository.clone(),
            university_ids.clone(),
            module_ids.clone(),
        ));

        let universities = Arc::new(UniversityService::new(
            university_repository.clone(),
            university_ids,
            linking.clone(),
            config.page_size,
        ));

        let modules = Arc::new(StudyModuleService::new(
            module_repository,
            university_repository,
            module_ids,
            linking,
            config.page_size,
        ));

        Self {
            config: Arc::new(config),
            links,
            paging,
            universities,
            modules,
        }
    }
}
