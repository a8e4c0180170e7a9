//! Companion REST API for counters.

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::domain::CountersRepository;
use crate::server::router::build_router;
use crate::server::shutdown::ShutdownManager;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct CountersServer {
    pub addr: Option<SocketAddr>,
    /// The bound listener, kept alive between try_bind() and run().
    listener: Option<TcpListener>,
    repository: Arc<dyn CountersRepository>,
    shutdown: Arc<ShutdownManager>,
}

impl CountersServer {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self {
            addr: None,
            listener: None,
            repository,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Bind `host:port`. Port 0 picks a free port; the actual address is returned.
    pub async fn try_bind(&mut self, host: &str, port: u16) -> Result<SocketAddr, ServerError> {
        let requested = format!("{}:{}", host, port);
        let addr: SocketAddr = requested
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: requested.clone(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let actual_addr = listener.local_addr()?;

        self.addr = Some(actual_addr);
        self.listener = Some(listener);
        tracing::info!("Counters API bound to {}", actual_addr);
        Ok(actual_addr)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown is signalled.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        let app = build_router(self.repository);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(error) = shutdown.wait_for_shutdown().await {
                    tracing::warn!(%error, "Signal handling failed; shutting down");
                }
            })
            .into_future()
            .await?;

        tracing::info!("Counters API stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
