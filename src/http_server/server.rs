//! # HTTP Server
//!
//! Serves every loaded schema as an HTML form and validates its submissions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event, Event};

use super::config::HttpServerConfig;
use super::form_routes::form_routes;
use super::observability_routes::observability_routes;
use super::state::FormsState;

/// HTTP form host
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: Arc<FormsState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: Arc<FormsState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(observability_routes(state.clone()))
            .merge(form_routes(state))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let addr_text = addr.to_string();
        log_event(Event::ServerStart, &[("addr", addr_text.as_str())]);

        let listener = TcpListener::bind(addr).await?;
        log_event(Event::Serving, &[("addr", addr_text.as_str())]);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FormAttributes, RenderContext};
    use crate::schema::SchemaLoader;
    use std::path::Path;

    fn empty_state() -> Arc<FormsState> {
        let loader = SchemaLoader::new(Path::new("."));
        FormsState::new(&loader, FormAttributes::default(), RenderContext::new())
            .unwrap()
            .into_shared()
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(9000), empty_state());
        assert_eq!(server.socket_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, empty_state()).router();
    }

    #[tokio::test]
    async fn test_start_rejects_bad_address() {
        let config = HttpServerConfig {
            host: "not an address".to_string(),
            ..Default::default()
        };
        let err = HttpServer::new(config, empty_state()).start().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
