//! Per-view state: fetched records, filter inputs and the editor.

use super::{filter_records, find_by_id, EditMode, Editor, Resource};
use crate::badge::Categorical;
use crate::error::{ChurchError, ChurchResult};
use ecclesia_db::DbPool;
use tracing::{debug, error, info, warn};

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// State of one CRUD view.
#[derive(Debug, Clone)]
pub struct ResourceView<R: Resource> {
    records: Vec<R>,
    loading: bool,
    search: String,
    /// `Err` holds category text that names no variant; it matches nothing.
    category: Option<Result<R::Category, String>>,
    editor: Editor<R>,
}

impl<R: Resource> Default for ResourceView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceView<R> {
    /// A view that has not fetched yet.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            search: String::new(),
            category: None,
            editor: Editor::Closed,
        }
    }

    /// Replace the records with a fresh ordered read.
    ///
    /// A failed read is logged and leaves the view empty. The loading flag is
    /// cleared either way.
    pub async fn fetch(&mut self, pool: &DbPool) {
        match R::list(pool, R::select()).await {
            Ok(records) => {
                debug!(table = %R::TABLE, count = records.len(), "records fetched");
                self.records = records;
            }
            Err(e) => {
                error!(table = %R::TABLE, error = %e, "error fetching records");
                self.records.clear();
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every fetched record, in read order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// The category filter, when it names a known variant.
    pub fn category(&self) -> Option<R::Category> {
        self.category.as_ref().and_then(|c| c.as_ref().ok().copied())
    }

    pub fn set_category(&mut self, category: Option<R::Category>) {
        self.category = category.map(Ok);
    }

    /// Set the category from form text. `""` and `"all"` clear the filter;
    /// text naming no variant filters out every record.
    pub fn set_category_raw(&mut self, raw: &str) {
        self.category = match raw {
            "" | "all" => None,
            raw => Some(R::Category::parse(raw).ok_or_else(|| raw.to_string())),
        };
    }

    /// Records passing the current search term and category.
    pub fn filtered(&self) -> Vec<&R> {
        match &self.category {
            Some(Err(raw)) => {
                debug!(table = %R::TABLE, category = %raw, "unknown category filter");
                Vec::new()
            }
            Some(Ok(category)) => filter_records(&self.records, &self.search, Some(*category)),
            None => filter_records(&self.records, &self.search, None),
        }
    }

    pub fn editor(&self) -> &Editor<R> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<R> {
        &mut self.editor
    }

    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    /// Open the editor on a copy of the fetched record `id`.
    pub fn open_edit(&mut self, id: &str) -> ChurchResult<()> {
        let record = find_by_id(&self.records, id)
            .ok_or_else(|| ChurchError::not_found(R::NOUN, id))?;
        self.editor.open_edit(record);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// Commit the open draft.
    ///
    /// Editing issues an update, creating an insert. On success the editor is
    /// closed and the records are re-read; the returned identifier is the
    /// one written. On failure the editor and its draft are left as they
    /// were so the user can correct and resubmit.
    pub async fn submit(&mut self, pool: &DbPool) -> ChurchResult<String> {
        let (mode, draft) = match &self.editor {
            Editor::Open { mode, draft } => (mode.clone(), draft.clone()),
            Editor::Closed => return Err(ChurchError::EditorClosed),
        };

        let result = match &mode {
            EditMode::Creating => R::insert(pool, &draft).await,
            EditMode::Editing(id) => R::update(pool, id, &draft).await.map(|_| id.clone()),
        };

        match result {
            Ok(id) => {
                info!(table = %R::TABLE, id = %id, "{} saved", R::NOUN);
                self.editor.close();
                self.fetch(pool).await;
                Ok(id)
            }
            Err(e) => {
                warn!(table = %R::TABLE, error = %e, "error saving {}", R::NOUN);
                Err(e)
            }
        }
    }

    /// Delete the record `id` once the user confirms.
    ///
    /// Returns `Ok(false)` without touching the store when confirmation is
    /// declined. After a successful delete the records are re-read.
    pub async fn delete(
        &mut self,
        pool: &DbPool,
        id: &str,
        confirm: impl Confirm,
    ) -> ChurchResult<bool> {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirm.confirm(&prompt) {
            debug!(table = %R::TABLE, id = %id, "delete cancelled");
            return Ok(false);
        }

        if let Err(e) = R::delete(pool, id).await {
            warn!(table = %R::TABLE, id = %id, error = %e, "error deleting {}", R::NOUN);
            return Err(e);
        }

        info!(table = %R::TABLE, id = %id, "{} deleted", R::NOUN);
        self.fetch(pool).await;
        Ok(true)
    }
}
