//! Cell domain models.

use crate::error::ChurchResult;
use crate::forms;
use ecclesia_db::queries::cells::{CellRow, CellValues};
use serde::{Deserialize, Serialize};

/// A cell (small group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    pub name: String,
    pub leader_id: Option<String>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub meeting_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Cell {
    /// Create a Cell from a database row.
    pub fn from_row(row: CellRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            leader_id: row.leader_id,
            meeting_day: row.meeting_day,
            meeting_time: row.meeting_time,
            meeting_address: row.meeting_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// "Wednesday 19:30", or whichever half is present.
    pub fn schedule(&self) -> Option<String> {
        match (self.meeting_day.as_deref(), self.meeting_time.as_deref()) {
            (Some(day), Some(time)) => Some(format!("{} {}", day, time)),
            (Some(day), None) => Some(day.to_string()),
            (None, Some(time)) => Some(time.to_string()),
            (None, None) => None,
        }
    }
}

/// Cell form state. An empty `leader_id` means no leader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellDraft {
    pub name: String,
    pub leader_id: String,
    pub meeting_day: String,
    pub meeting_time: String,
    pub meeting_address: String,
}

impl CellDraft {
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            name: cell.name.clone(),
            leader_id: cell.leader_id.clone().unwrap_or_default(),
            meeting_day: cell.meeting_day.clone().unwrap_or_default(),
            meeting_time: cell.meeting_time.clone().unwrap_or_default(),
            meeting_address: cell.meeting_address.clone().unwrap_or_default(),
        }
    }

    /// Validate and convert to stored values.
    pub fn to_values(&self) -> ChurchResult<CellValues> {
        Ok(CellValues {
            name: forms::required("Name", &self.name)?,
            leader_id: forms::optional(&self.leader_id),
            meeting_day: forms::optional(&self.meeting_day),
            meeting_time: forms::optional_time("Meeting time", &self.meeting_time)?,
            meeting_address: forms::optional(&self.meeting_address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validation() {
        let mut draft = CellDraft {
            name: "Vida Nova".to_string(),
            meeting_time: "19:30".to_string(),
            ..Default::default()
        };
        let values = draft.to_values().unwrap();
        assert_eq!(values.leader_id, None);
        assert_eq!(values.meeting_time.as_deref(), Some("19:30"));

        draft.meeting_time = "half past seven".to_string();
        assert!(draft.to_values().unwrap_err().is_validation());

        draft.name.clear();
        assert!(draft.to_values().is_err());
    }

    #[test]
    fn schedule_joins_day_and_time() {
        let mut cell = Cell {
            id: "c-1".to_string(),
            name: "Vida Nova".to_string(),
            leader_id: None,
            meeting_day: Some("Wednesday".to_string()),
            meeting_time: Some("19:30".to_string()),
            meeting_address: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(cell.schedule().as_deref(), Some("Wednesday 19:30"));
        cell.meeting_time = None;
        assert_eq!(cell.schedule().as_deref(), Some("Wednesday"));
        cell.meeting_day = None;
        assert_eq!(cell.schedule(), None);
    }
}
