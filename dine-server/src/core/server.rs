//! Server Implementation
//!
//! Binds the staff and provider listeners against one shared state and
//! serves both until interrupted.

use std::net::SocketAddr;

use crate::api;
use crate::core::{Config, Result, ServerState};

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests and embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let staff_app = api::build_staff_app(&state);
        let provider_app = api::build_provider_app(&state);

        let staff_addr = SocketAddr::from(([0, 0, 0, 0], self.config.staff_port));
        let provider_addr = SocketAddr::from(([0, 0, 0, 0], self.config.provider_port));

        let staff_listener = tokio::net::TcpListener::bind(staff_addr).await?;
        let provider_listener = tokio::net::TcpListener::bind(provider_addr).await?;

        tracing::info!("Staff API listening on {}", staff_addr);
        tracing::info!("Provider API listening on {}", provider_addr);

        let staff = async {
            axum::serve(staff_listener, staff_app)
                .with_graceful_shutdown(shutdown_signal())
                .await
        };
        let provider = async {
            axum::serve(provider_listener, provider_app)
                .with_graceful_shutdown(shutdown_signal())
                .await
        };

        tokio::try_join!(staff, provider)?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
