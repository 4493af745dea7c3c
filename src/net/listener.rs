//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Resolve and bind the configured host and port
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept: {0}")]
    Accept(#[source] std::io::Error),

    #[error("connection limiter closed")]
    Closed,
}

/// A bounded TCP listener that limits concurrent connections.
///
/// When the limit is reached, accepting waits until a slot becomes available.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    connection_limit: Arc<Semaphore>,
    max_connections: usize,
}

impl Listener {
    /// Bind to `host:port` with a connection limit. Host names are looked up
    /// here; the first address that binds wins.
    pub async fn bind(host: &str, port: u16, max_connections: usize) -> Result<Self, ListenerError> {
        let bind_error = |source| ListenerError::Bind {
            addr: display_addr(host, port),
            source,
        };
        let listener = TcpListener::bind((host, port)).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        tracing::info!(
            address = %local_addr,
            max_connections,
            "Listener bound"
        );

        Ok(Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(max_connections)),
            max_connections,
        })
    }

    /// Accept a new connection, respecting the connection limit.
    ///
    /// Returns the stream and a permit that must be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        // Acquire permit first (backpressure)
        let permit = self
            .connection_limit
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ListenerError::Closed)?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

/// `host:port`, with IPv6 literals bracketed.
pub fn display_addr(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// A permit representing a connection slot.
///
/// Dropping it releases the slot, even if the connection task panics.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn permits_are_released_on_drop() {
        let listener = Listener::bind("127.0.0.1", 0, 2).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        let _client = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (_stream, _peer, permit) = listener.accept().await.unwrap();
        assert_eq!(listener.available_permits(), 1);

        drop(permit);
        assert_eq!(listener.available_permits(), 2);
        assert_eq!(listener.max_connections(), 2);
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let first = Listener::bind("127.0.0.1", 0, 1).await.unwrap();
        let taken = first.local_addr().unwrap();

        let err = Listener::bind("127.0.0.1", taken.port(), 1).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { ref addr, .. } if *addr == taken.to_string()));
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_bind_error() {
        let err = Listener::bind("broker.example.invalid", 61613, 1).await.unwrap_err();
        match err {
            ListenerError::Bind { addr, .. } => assert_eq!(addr, "broker.example.invalid:61613"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        assert_eq!(display_addr("::1", 61613), "[::1]:61613");
        assert_eq!(display_addr("0.0.0.0", 61613), "0.0.0.0:61613");
    }
}
