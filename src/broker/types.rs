//! Values passed between the managers, the store and the schedulers.

use uuid::Uuid;

use crate::net::connection::ConnectionId;

/// A message addressed to a queue or topic destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub destination: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Message {
    /// Create a message with a fresh id.
    pub fn new(destination: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// A connection subscribed to a queue.
///
/// A reliable subscriber acknowledges every message it receives, so the
/// broker can redeliver if the connection drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscriber {
    pub connection: ConnectionId,
    pub reliable: bool,
}

impl Subscriber {
    pub fn new(connection: ConnectionId, reliable: bool) -> Self {
        Self { connection, reliable }
    }
}
