//! Member domain models.

use crate::badge::{BadgeTone, Categorical};
use crate::error::ChurchResult;
use crate::forms;
use ecclesia_db::queries::members::{MemberRow, MemberValues};
use serde::{Deserialize, Serialize};

/// A church member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub conversion_date: Option<String>,
    pub address: Option<String>,
    pub cell_id: Option<String>,
    pub status: MemberStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Member {
    /// Create a Member from a database row.
    pub fn from_row(row: MemberRow) -> Self {
        let status = MemberStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(id = %row.id, status = %row.status, "unknown member status");
            MemberStatus::default()
        });

        Self {
            id: row.id,
            name: row.name,
            national_id: row.national_id,
            phone: row.phone,
            email: row.email,
            conversion_date: row.conversion_date,
            address: row.address,
            cell_id: row.cell_id,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Membership status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Transferred,
}

impl Categorical for MemberStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Transferred];

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "transferred" => Some(Self::Transferred),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Transferred => "transferred",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Transferred => "Transferred",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Green,
            Self::Inactive => BadgeTone::Gray,
            Self::Transferred => BadgeTone::Blue,
        }
    }
}

/// Member form state. An empty `cell_id` means no cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberDraft {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub conversion_date: String,
    pub address: String,
    pub cell_id: String,
    pub status: MemberStatus,
}

impl MemberDraft {
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            national_id: member.national_id.clone().unwrap_or_default(),
            phone: member.phone.clone().unwrap_or_default(),
            email: member.email.clone().unwrap_or_default(),
            conversion_date: member.conversion_date.clone().unwrap_or_default(),
            address: member.address.clone().unwrap_or_default(),
            cell_id: member.cell_id.clone().unwrap_or_default(),
            status: member.status,
        }
    }

    /// Validate and convert to stored values.
    pub fn to_values(&self) -> ChurchResult<MemberValues> {
        Ok(MemberValues {
            name: forms::required("Name", &self.name)?,
            national_id: forms::optional(&self.national_id),
            phone: forms::optional(&self.phone),
            email: forms::optional(&self.email),
            conversion_date: forms::optional_date("Conversion date", &self.conversion_date)?,
            address: forms::optional(&self.address),
            cell_id: forms::optional(&self.cell_id),
            status: self.status.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_blanks_become_null() {
        let draft = MemberDraft {
            name: "  Ana  ".to_string(),
            email: " ".to_string(),
            status: MemberStatus::Transferred,
            ..Default::default()
        };
        let values = draft.to_values().unwrap();
        assert_eq!(values.name, "Ana");
        assert_eq!(values.email, None);
        assert_eq!(values.cell_id, None);
        assert_eq!(values.status, "transferred");
    }

    #[test]
    fn draft_rejects_missing_name_and_bad_date() {
        assert!(MemberDraft::default().to_values().unwrap_err().is_validation());

        let draft = MemberDraft {
            name: "Ana".to_string(),
            conversion_date: "31/12/2020".to_string(),
            ..Default::default()
        };
        assert!(draft.to_values().unwrap_err().is_validation());
    }

    #[test]
    fn unknown_status_falls_back() {
        let row = MemberRow {
            id: "m-1".to_string(),
            name: "Ana".to_string(),
            national_id: None,
            phone: None,
            email: None,
            conversion_date: None,
            address: None,
            cell_id: Some("c-1".to_string()),
            status: "visitor".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let member = Member::from_row(row);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(MemberDraft::from_member(&member).cell_id, "c-1");
    }
}
