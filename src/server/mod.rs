//! Broker server.
//!
//! # Responsibilities
//! - Hold the assembled queue and topic managers
//! - Resolve and bind the listen address on demand (never during assembly)
//! - Accept connections and run one task per client
//! - Stop accepting when the shutdown future completes

mod session;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::broker::{QueueManager, TopicManager};
use crate::config::schema::DEFAULT_MAX_CONNECTIONS;
use crate::net::listener::display_addr;
use crate::net::{ConnectionTracker, Listener, ListenerError};

/// Pause after a failed accept (e.g. out of file descriptors).
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// A fully wired broker that is not listening yet.
#[derive(Debug)]
pub struct StompServer {
    host: String,
    port: u16,
    max_connections: usize,
    queue_manager: Arc<QueueManager>,
    topic_manager: Arc<TopicManager>,
}

impl StompServer {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        queue_manager: QueueManager,
        topic_manager: TopicManager,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            queue_manager: Arc::new(queue_manager),
            topic_manager: Arc::new(topic_manager),
        }
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// The configured host, resolved only when binding.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` as it will be bound.
    pub fn bind_addr(&self) -> String {
        display_addr(&self.host, self.port)
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn queue_manager(&self) -> &Arc<QueueManager> {
        &self.queue_manager
    }

    pub fn topic_manager(&self) -> &Arc<TopicManager> {
        &self.topic_manager
    }

    /// Open the listening socket.
    pub async fn bind(self) -> Result<BoundServer, ListenerError> {
        let listener = Listener::bind(&self.host, self.port, self.max_connections).await?;
        Ok(BoundServer {
            listener,
            tracker: ConnectionTracker::new(),
            queue_manager: self.queue_manager,
            topic_manager: self.topic_manager,
        })
    }

    /// Bind and accept connections until the process is terminated.
    pub async fn serve_forever(self) -> Result<(), ListenerError> {
        self.bind().await?.serve_forever().await
    }
}

/// A server with an open listening socket.
#[derive(Debug)]
pub struct BoundServer {
    listener: Listener,
    tracker: ConnectionTracker,
    queue_manager: Arc<QueueManager>,
    topic_manager: Arc<TopicManager>,
}

impl BoundServer {
    /// The actual bound address (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Handle on the active connection count.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    pub async fn serve_forever(self) -> Result<(), ListenerError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Accept connections until `shutdown` completes. Connections already
    /// accepted keep running until their clients disconnect.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()>,
    {
        let addr = self.listener.local_addr().map_err(ListenerError::Accept)?;
        tracing::info!(address = %addr, "STOMP server accepting connections");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(address = %addr, "STOMP server stopped accepting");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer, permit)) => {
                        let guard = self.tracker.track();
                        tokio::spawn(session::run(
                            stream,
                            peer,
                            guard,
                            permit,
                            Arc::clone(&self.queue_manager),
                            Arc::clone(&self.topic_manager),
                        ));
                    }
                    Err(ListenerError::Accept(e)) => {
                        tracing::warn!(error = %e, "Accept failed");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::scheduler::{FavorReliableSubscriberScheduler, RandomQueueScheduler};
    use crate::store::memory::MemoryQueue;

    fn server(host: &str, port: u16) -> StompServer {
        let qm = QueueManager::new(
            Box::new(MemoryQueue::new()),
            Box::new(FavorReliableSubscriberScheduler::new()),
            Box::new(RandomQueueScheduler::new()),
        );
        StompServer::new(host, port, qm, TopicManager::new())
    }

    #[test]
    fn connection_limit_defaults_match_config() {
        assert_eq!(server("127.0.0.1", 0).max_connections(), CoreConfig::default().max_connections);
        assert_eq!(server("127.0.0.1", 0).with_max_connections(3).max_connections(), 3);
    }

    #[test]
    fn bind_addr_brackets_ipv6() {
        assert_eq!(server("::1", 61613).bind_addr(), "[::1]:61613");
        assert_eq!(server("localhost", 5000).bind_addr(), "localhost:5000");
    }
}
