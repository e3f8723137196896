//! Form/editor state.

use super::Resource;

/// What an open form will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Editing(String),
}

/// Closed, or open with a draft.
///
/// Opening for edit copies the record into a fresh draft, so changes to the
/// draft never touch the fetched list until a submit succeeds and the list
/// is re-read.
#[derive(Debug, Clone)]
pub enum Editor<R: Resource> {
    Closed,
    Open { mode: EditMode, draft: R::Draft },
}

impl<R: Resource> Default for Editor<R> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<R: Resource> Editor<R> {
    /// Open with a blank draft.
    pub fn open_create(&mut self) {
        *self = Self::Open {
            mode: EditMode::Creating,
            draft: R::blank_draft(),
        };
    }

    /// Open with a copy of `record`.
    pub fn open_edit(&mut self, record: &R) {
        *self = Self::Open {
            mode: EditMode::Editing(record.id().to_string()),
            draft: record.to_draft(),
        };
    }

    /// Close and discard the draft.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn mode(&self) -> Option<&EditMode> {
        match self {
            Self::Open { mode, .. } => Some(mode),
            Self::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match self {
            Self::Open { draft, .. } => Some(draft),
            Self::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match self {
            Self::Open { draft, .. } => Some(draft),
            Self::Closed => None,
        }
    }

    /// Replace the draft of an open form. No effect when closed.
    pub fn set_draft(&mut self, new_draft: R::Draft) {
        if let Self::Open { draft, .. } = self {
            *draft = new_draft;
        }
    }
}
