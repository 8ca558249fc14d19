use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// vdiff HTTP server.
pub struct VdiffServer {
    config: ServerConfig,
}

impl VdiffServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(&self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(&self.config);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            bind_addr = %self.config.bind_addr,
            max_input_bytes = self.config.max_input_bytes,
            "vdiff server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = VdiffServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8000".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = VdiffServer::new(ServerConfig {
            enable_cors: true,
            ..Default::default()
        });
        let _router = server.router();
    }
}
