//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_routes;
use crate::config::ServerConfig;
use crate::core::Repository;
use crate::entities::{StudyModule, University};
use crate::storage::InMemoryRepository;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server
///
/// Repositories default to in-memory storage.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::from_env()?)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    university_repository: Option<Arc<dyn Repository<University>>>,
    module_repository: Option<Arc<dyn Repository<StudyModule>>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            university_repository: None,
            module_repository: None,
        }
    }

    /// Set the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom repository for universities
    pub fn with_university_repository(
        mut self,
        repository: impl Repository<University> + 'static,
    ) -> Self {
        self.university_repository = Some(Arc::new(repository));
        self
    }

    /// Use a custom repository for study modules
    pub fn with_module_repository(
        mut self,
        repository: impl Repository<StudyModule> + 'static,
    ) -> Self {
        self.module_repository = Some(Arc::new(repository));
        self
    }

    /// Build the application state
    pub fn build_host(self) -> Result<ServerHost> {
        if self.config.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }

        let universities: Arc<dyn Repository<University>> = match self.university_repository {
            Some(repository) => repository,
            None => Arc::new(InMemoryRepository::new()),
        };
        let modules: Arc<dyn Repository<StudyModule>> = match self.module_repository {
            Some(repository) => repository,
            None => Arc::new(InMemoryRepository::new()),
        };

        Ok(ServerHost::new(self.config, universities, modules))
    }

    /// Build the final router, with request tracing
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(traced_routes(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured host and port
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let host = Arc::new(self.build_host()?);
        let addr = host.config.bind_address();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            "Server listening on {} (base URI {})",
            addr,
            host.links.base_uri()
        );

        let app = traced_routes(host);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn traced_routes(host: Arc<ServerHost>) -> Router {
    build_routes(host).layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(ServerBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_host_uses_configured_base_uri() {
        let config = ServerConfig {
            base_uri: Some("https://travel.example.org/".to_string()),
            ..ServerConfig::default()
        };
        let host = ServerBuilder::new().with_config(config).build_host().unwrap();
        assert_eq!(host.links.base_uri(), "https://travel.example.org");
        assert_eq!(host.config.bind_address(), "localhost:8080");
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = ServerConfig {
            page_size: 0,
            ..ServerConfig::default()
        };
        assert!(ServerBuilder::new().with_config(config).build().is_err());
    }

    #[tokio::test]
    async fn test_custom_repositories_are_used() {
        let universities = InMemoryRepository::<University>::new();
        let host = ServerBuilder::new()
            .with_university_repository(universities.clone())
            .build_host()
            .unwrap();

        let payload = serde_json::from_value(serde_json::json!({
            "name": "TUM",
            "country": "Germany",
            "department": "CS",
            "contactPersonName": "Jane",
            "outgoingStudentNumber": 1,
            "incomingStudentNumber": 2,
            "springSemesterStart": "2025-03-01",
            "fallSemesterStart": "2025-10-01"
        }))
        .unwrap();
        host.universities.create(payload).await.unwrap();

        assert_eq!(universities.find_all().await.unwrap().len(), 1);
    }
}
