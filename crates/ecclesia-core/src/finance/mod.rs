//! Finance management: tithes, offerings, campaigns.

pub mod model;

use crate::error::ChurchResult;
use crate::forms;
use crate::resource::{Resource, SearchTerm};
use async_trait::async_trait;
use ecclesia_db::queries::finances as queries;
use ecclesia_db::{DbPool, Select, Table};
use model::{parse_amount, Finance, FinanceDraft, FinanceKind};
use rust_decimal::Decimal;
use serde::Serialize;

#[async_trait]
impl Resource for Finance {
    type Draft = FinanceDraft;
    type Category = FinanceKind;

    const TABLE: Table = Table::Finances;
    const NOUN: &'static str = "finance entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn select() -> Select {
        Select::ordered_by("date").descending()
    }

    fn blank_draft() -> FinanceDraft {
        FinanceDraft {
            date: forms::today_string(),
            ..Default::default()
        }
    }

    fn to_draft(&self) -> FinanceDraft {
        FinanceDraft::from_finance(self)
    }

    fn matches(&self, term: &SearchTerm) -> bool {
        term.matches_text(self.description.as_deref())
    }

    fn category(&self) -> Option<FinanceKind> {
        Some(self.kind)
    }

    async fn list(pool: &DbPool, select: Select) -> ChurchResult<Vec<Self>> {
        let rows = queries::list_finances(pool, select).await?;
        Ok(rows.into_iter().map(Finance::from_row).collect())
    }

    async fn insert(pool: &DbPool, draft: &FinanceDraft) -> ChurchResult<String> {
        let values = draft.to_values()?;
        Ok(queries::create_finance(pool, values).await?)
    }

    async fn update(pool: &DbPool, id: &str, draft: &FinanceDraft) -> ChurchResult<()> {
        let values = draft.to_values()?;
        queries::update_finance(pool, id, values).await?;
        Ok(())
    }
}

/// Get a finance entry by ID.
pub async fn get_finance(pool: &DbPool, id: &str) -> ChurchResult<Finance> {
    let row = queries::get_finance(pool, id).await?;
    Ok(Finance::from_row(row))
}

/// Every stored amount, parsed.
pub async fn all_amounts(pool: &DbPool) -> ChurchResult<Vec<Decimal>> {
    let raw = queries::list_amounts(pool).await?;
    Ok(raw.iter().map(|a| parse_amount(a)).collect())
}

/// Count and sum of a filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FinanceSummary {
    pub count: usize,
    pub total: Decimal,
}

impl FinanceSummary {
    pub fn of(records: &[&Finance]) -> Self {
        Self {
            count: records.len(),
            total: records.iter().map(|f| f.amount).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::model::{Member, MemberDraft};
    use crate::resource::filter_records;
    use ecclesia_db::init_memory_pool;

    fn draft(date: &str, kind: FinanceKind, amount: &str, description: &str) -> FinanceDraft {
        FinanceDraft {
            date: date.to_string(),
            kind,
            amount: amount.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn newest_first_and_filtered_total() {
        let pool = init_memory_pool().unwrap();
        Finance::insert(&pool, &draft("2024-01-05", FinanceKind::Tithe, "100.00", "January tithe"))
            .await
            .unwrap();
        Finance::insert(&pool, &draft("2024-03-01", FinanceKind::Offering, "20.50", ""))
            .await
            .unwrap();
        Finance::insert(&pool, &draft("2024-02-11", FinanceKind::Campaign, "0.25", "Roof campaign"))
            .await
            .unwrap();

        let all = Finance::list(&pool, Finance::select()).await.unwrap();
        let dates: Vec<_> = all.iter().map(|f| f.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-11", "2024-01-05"]);

        let everything = filter_records(&all, "", None);
        let summary = FinanceSummary::of(&everything);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total.to_string(), "120.75");

        // An entry without description only matches the empty term.
        let campaign = filter_records(&all, "CAMPAIGN", None);
        assert_eq!(campaign.len(), 1);
        assert_eq!(FinanceSummary::of(&campaign).total.to_string(), "0.25");

        let tithes = filter_records(&all, "", Some(FinanceKind::Tithe));
        assert_eq!(tithes.len(), 1);

        let mut amounts = all_amounts(&pool).await.unwrap();
        amounts.sort();
        assert_eq!(amounts.len(), 3);
    }

    #[tokio::test]
    async fn deleting_contributor_keeps_entry_anonymous() {
        let pool = init_memory_pool().unwrap();
        let member = Member::insert(
            &pool,
            &MemberDraft {
                name: "Ana".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let mut entry = draft("2024-01-05", FinanceKind::Tithe, "50", "");
        entry.member_id = member.clone();
        let id = Finance::insert(&pool, &entry).await.unwrap();

        Member::delete(&pool, &member).await.unwrap();
        let finance = get_finance(&pool, &id).await.unwrap();
        assert_eq!(finance.member_id, None);
        assert_eq!(finance.amount, Decimal::new(5000, 2));
    }

    #[test]
    fn blank_draft_is_dated_today() {
        let blank = Finance::blank_draft();
        assert_eq!(blank.date, forms::today_string());
        assert_eq!(blank.kind, FinanceKind::Tithe);
        assert!(blank.amount.is_empty());
    }
}
