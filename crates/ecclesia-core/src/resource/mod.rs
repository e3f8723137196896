//! Generic resource editor.
//!
//! Members, cells, finances and events are all edited the same way: an
//! ordered read into memory, a search/category filter over it, a draft that
//! is either blank or copied from a record, and a submit that inserts or
//! updates and then re-reads. [`Resource`] captures what differs between the
//! four; [`ResourceView`] and [`Editor`] implement what they share.

pub mod editor;
pub mod search;
pub mod view;

pub use editor::{EditMode, Editor};
pub use search::{filter_records, SearchTerm};
pub use view::{Confirm, ResourceView};

use crate::badge::Categorical;
use crate::error::ChurchResult;
use async_trait::async_trait;
use ecclesia_db::queries;
use ecclesia_db::{DbPool, Select, Table};
use std::fmt::Debug;

/// A record kind edited through a [`ResourceView`].
#[async_trait]
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    /// Form state mirrored to the inputs.
    type Draft: Clone + Debug + Default + PartialEq + Send + Sync + 'static;

    /// Field the category filter compares against.
    type Category: Categorical;

    const TABLE: Table;

    /// Singular noun for messages ("member").
    const NOUN: &'static str;

    fn id(&self) -> &str;

    /// The view's ordered read.
    fn select() -> Select;

    /// Draft for a new record.
    fn blank_draft() -> Self::Draft {
        Self::Draft::default()
    }

    /// Draft copied from this record.
    fn to_draft(&self) -> Self::Draft;

    /// Whether the record matches a non-empty search term.
    fn matches(&self, term: &SearchTerm) -> bool;

    /// Category value, if the kind has one.
    fn category(&self) -> Option<Self::Category>;

    async fn list(pool: &DbPool, select: Select) -> ChurchResult<Vec<Self>>;

    /// Validate the draft and insert it. Returns the assigned identifier.
    async fn insert(pool: &DbPool, draft: &Self::Draft) -> ChurchResult<String>;

    /// Validate the draft and overwrite the record `id` with it.
    async fn update(pool: &DbPool, id: &str, draft: &Self::Draft) -> ChurchResult<()>;

    async fn delete(pool: &DbPool, id: &str) -> ChurchResult<()> {
        queries::delete(pool, Self::TABLE, id).await?;
        Ok(())
    }
}

/// Read records for a lookup (selector options, names). Failures are logged
/// and produce an empty list.
pub async fn lookup<R: Resource>(pool: &DbPool, select: Select) -> Vec<R> {
    match R::list(pool, select).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(table = %R::TABLE, error = %e, "error fetching lookup records");
            Vec::new()
        }
    }
}

/// Find a record by identifier in a fetched list.
pub fn find_by_id<'a, R: Resource>(records: &'a [R], id: &str) -> Option<&'a R> {
    records.iter().find(|r| r.id() == id)
}
