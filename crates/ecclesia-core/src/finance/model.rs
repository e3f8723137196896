//! Finance domain models.

use crate::badge::{BadgeTone, Categorical};
use crate::error::{ChurchError, ChurchResult};
use crate::forms;
use ecclesia_db::queries::finances::{FinanceRow, FinanceValues};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decimal places kept for stored amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// A financial entry (tithe, offering, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finance {
    pub id: String,
    pub date: String,
    pub kind: FinanceKind,
    pub amount: Decimal,
    pub member_id: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Finance {
    /// Create a Finance from a database row.
    pub fn from_row(row: FinanceRow) -> Self {
        let kind = FinanceKind::parse(&row.kind).unwrap_or_else(|| {
            tracing::warn!(id = %row.id, kind = %row.kind, "unknown finance kind");
            FinanceKind::default()
        });

        Self {
            amount: parse_amount(&row.amount),
            id: row.id,
            date: row.date,
            kind,
            member_id: row.member_id,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Parse stored amount text. Unparseable text counts as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or_else(|_| {
        tracing::warn!(amount = %raw, "unparseable amount, counting as zero");
        Decimal::ZERO
    })
}

/// Kind of contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    #[default]
    Tithe,
    Offering,
    Campaign,
    Other,
}

impl Categorical for FinanceKind {
    const ALL: &'static [Self] = &[Self::Tithe, Self::Offering, Self::Campaign, Self::Other];

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "tithe" => Some(Self::Tithe),
            "offering" => Some(Self::Offering),
            "campaign" => Some(Self::Campaign),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Tithe => "tithe",
            Self::Offering => "offering",
            Self::Campaign => "campaign",
            Self::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Tithe => "Tithe",
            Self::Offering => "Offering",
            Self::Campaign => "Campaign",
            Self::Other => "Other",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Tithe => BadgeTone::Blue,
            Self::Offering => BadgeTone::Green,
            Self::Campaign => BadgeTone::Orange,
            Self::Other => BadgeTone::Gray,
        }
    }
}

/// Finance form state. An empty `member_id` is an anonymous contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceDraft {
    pub date: String,
    pub kind: FinanceKind,
    pub amount: String,
    pub member_id: String,
    pub description: String,
}

impl FinanceDraft {
    pub fn from_finance(finance: &Finance) -> Self {
        Self {
            date: finance.date.clone(),
            kind: finance.kind,
            amount: finance.amount.to_string(),
            member_id: finance.member_id.clone().unwrap_or_default(),
            description: finance.description.clone().unwrap_or_default(),
        }
    }

    /// Amount as entered. Non-numeric text counts as zero; negative amounts
    /// are rejected.
    pub fn parsed_amount(&self) -> ChurchResult<Decimal> {
        let amount = Decimal::from_str(self.amount.trim()).unwrap_or(Decimal::ZERO);
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ChurchError::validation("Amount cannot be negative"));
        }
        Ok(amount.round_dp(AMOUNT_SCALE))
    }

    /// Validate and convert to stored values.
    pub fn to_values(&self) -> ChurchResult<FinanceValues> {
        Ok(FinanceValues {
            date: forms::date("Date", &self.date)?,
            kind: self.kind.as_str().to_string(),
            amount: self.parsed_amount()?.to_string(),
            member_id: forms::optional(&self.member_id),
            description: forms::optional(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: &str) -> FinanceDraft {
        FinanceDraft {
            date: "2024-03-10".to_string(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn amounts_are_exact() {
        assert_eq!(draft("10.10").to_values().unwrap().amount, "10.10");
        assert_eq!(draft(" 5.5 ").parsed_amount().unwrap(), Decimal::new(55, 1));
        assert_eq!(draft("0.005").to_values().unwrap().amount, "0.00");
    }

    #[test]
    fn non_numeric_amount_is_zero() {
        assert_eq!(draft("ten").parsed_amount().unwrap(), Decimal::ZERO);
        assert_eq!(draft("").parsed_amount().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn negative_amount_and_missing_date_rejected() {
        assert!(draft("-1").to_values().unwrap_err().is_validation());
        let mut undated = draft("1");
        undated.date.clear();
        assert!(undated.to_values().unwrap_err().is_validation());
    }

    #[test]
    fn row_with_bad_amount_counts_as_zero() {
        let finance = Finance::from_row(FinanceRow {
            id: "f-1".to_string(),
            date: "2024-03-10".to_string(),
            kind: "offering".to_string(),
            amount: "n/a".to_string(),
            member_id: None,
            description: None,
            created_at: String::new(),
            updated_at: String::new(),
        });
        assert_eq!(finance.amount, Decimal::ZERO);
        assert_eq!(finance.kind, FinanceKind::Offering);
    }
}
