use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::Instrument;

use crate::api::AppState;
use crate::error::{AppError, AppResult};

pub mod codec;
pub mod connection;
pub mod connection_id;

pub use codec::{CommandCodec, Frame};
pub use connection::handle_connection;
pub use connection_id::{connection_span, ConnectionId};

/// Default cap on a command line, matching a 4 KiB receive buffer
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Limits applied to each connection and to the listener as a whole
#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Maximum number of connections served at once, `None` for unbounded
    pub max_connections: Option<usize>,
    /// Maximum length in bytes of a single command line
    pub max_line_length: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            max_connections: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Binds a TCP listener to `address`
pub async fn bind(address: &str) -> AppResult<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|source| AppError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Accepts connections until `shutdown` resolves
///
/// Every connection is served on its own task with a clone of `state`.
/// Connections still open when `shutdown` resolves are left running.
pub async fn serve<F>(listener: TcpListener, state: AppState, options: ServerOptions, shutdown: F)
where
    F: Future<Output = ()>,
{
    let connection_limit = options
        .max_connections
        .map(|limit| Arc::new(Semaphore::new(limit)));

    tokio::pin!(shutdown);

    loop {
        let permit = tokio::select! {
            _ = &mut shutdown => break,
            permit = acquire(connection_limit.as_ref()) => permit,
        };

        let (stream, peer) = tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(error) => {
                    tracing::error!(%error, "Error accepting client");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            },
        };

        let state = state.clone();
        let span = connection_span(ConnectionId::new(), peer);

        tokio::spawn(
            async move {
                let _permit = permit;
                tracing::info!("Connection opened");

                match handle_connection(stream, state, options.max_line_length).await {
                    Ok(()) => tracing::info!("Connection closed"),
                    Err(error) => tracing::warn!(%error, "Connection closed with error"),
                }
            }
            .instrument(span),
        );
    }

    tracing::info!("Stopped accepting connections");
}

async fn acquire(limit: Option<&Arc<Semaphore>>) -> Option<OwnedSemaphorePermit> {
    match limit {
        // Never closed, so this always yields a permit
        Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
        None => None,
    }
}
