//! Application state.

use ecclesia_core::session::SessionProvider;
use ecclesia_db::{create_broadcast_channel, BroadcastSender, DbPool, Table, WebSocketMessage};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub tx: BroadcastSender,
    pub session: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            db,
            tx: create_broadcast_channel(),
            session,
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }

    /// Tell clients that `table` changed.
    pub fn table_changed(&self, table: Table) {
        self.broadcast(WebSocketMessage::TableChanged { table });
    }
}
