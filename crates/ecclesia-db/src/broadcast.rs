//! Shared broadcast channel for change notifications.
//!
//! The web server publishes a message after every successful write so that
//! connected clients know to re-fetch the affected view.

use crate::queries::Table;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// WebSocket message types for change notifications.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    /// Records in a table were inserted, updated or deleted.
    TableChanged { table: Table },
    /// Request a full refresh of every view.
    RefreshAll,
}

/// Type alias for the broadcast sender.
pub type BroadcastSender = broadcast::Sender<WebSocketMessage>;

/// Type alias for the broadcast receiver.
pub type BroadcastReceiver = broadcast::Receiver<WebSocketMessage>;

/// Create a new broadcast channel with default capacity.
pub fn create_broadcast_channel() -> BroadcastSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_changed_wire_format() {
        let json = serde_json::to_string(&WebSocketMessage::TableChanged {
            table: Table::Finances,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"TableChanged","data":{"table":"finances"}}"#);
    }
}
