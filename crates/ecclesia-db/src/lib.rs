//! Ecclesia Database Layer
//!
//! SQLite-backed table store for members, cells, finances and events.
//! Every table is reached through the same four operations: an ordered
//! read, an insert that assigns the identifier, an update by identifier and
//! a delete by identifier.

pub mod broadcast;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use broadcast::{
    BroadcastReceiver, BroadcastSender, WebSocketMessage, create_broadcast_channel,
};
pub use pool::{DbError, DbPool, DbResult};
pub use queries::{Predicate, Select, Table};

use std::path::Path;

/// Open the database file at `path`, creating it if needed, and bring the
/// schema up to date.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::info!(path = %path.display(), "opening database");

    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}

/// In-memory database with the schema applied. Used by tests across the
/// workspace.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/.ecclesia/ecclesia.db");

        let pool = init_pool(&path).expect("should open");
        assert!(path.exists());
        assert_eq!(pool.path(), Some(path.as_path()));
    }
}
