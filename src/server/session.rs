//! Per-connection task.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::broker::{QueueManager, TopicManager};
use crate::net::{ConnectionGuard, ConnectionPermit};

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Serve one client until it disconnects, then release its subscriptions.
///
/// Incoming bytes are drained and counted. Frame handling belongs to the
/// STOMP protocol engine, which drives the managers directly.
pub(super) async fn run(
    mut stream: TcpStream,
    peer: SocketAddr,
    guard: ConnectionGuard,
    _permit: ConnectionPermit,
    queue_manager: Arc<QueueManager>,
    topic_manager: Arc<TopicManager>,
) {
    let connection_id = guard.id();
    tracing::debug!(connection_id = %connection_id, peer_addr = %peer, "Client connected");

    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut bytes_received: u64 = 0;
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => bytes_received += n as u64,
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "Read failed");
                break;
            }
        }
    }

    let queue_subscriptions = queue_manager.disconnect(connection_id);
    let topic_subscriptions = topic_manager.disconnect(connection_id);
    tracing::debug!(
        connection_id = %connection_id,
        peer_addr = %peer,
        bytes_received,
        queue_subscriptions,
        topic_subscriptions,
        "Client disconnected"
    );
}
