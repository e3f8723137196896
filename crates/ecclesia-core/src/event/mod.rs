//! Event management.

pub mod model;

use crate::error::ChurchResult;
use crate::forms;
use crate::resource::{Resource, SearchTerm};
use async_trait::async_trait;
use ecclesia_db::queries::{self as db_queries, events as queries};
use ecclesia_db::{DbPool, Predicate, Select, Table};
use model::{Event, EventDraft, EventStatus};

#[async_trait]
impl Resource for Event {
    type Draft = EventDraft;
    type Category = EventStatus;

    const TABLE: Table = Table::Events;
    const NOUN: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }

    fn select() -> Select {
        Select::ordered_by("date").descending()
    }

    fn to_draft(&self) -> EventDraft {
        EventDraft::from_event(self)
    }

    fn matches(&self, term: &SearchTerm) -> bool {
        term.matches_text(Some(&self.name)) || term.matches_text(self.location.as_deref())
    }

    fn category(&self) -> Option<EventStatus> {
        Some(self.status)
    }

    async fn list(pool: &DbPool, select: Select) -> ChurchResult<Vec<Self>> {
        let rows = queries::list_events(pool, select).await?;
        Ok(rows.into_iter().map(Event::from_row).collect())
    }

    async fn insert(pool: &DbPool, draft: &EventDraft) -> ChurchResult<String> {
        let values = draft.to_values()?;
        Ok(queries::create_event(pool, values).await?)
    }

    async fn update(pool: &DbPool, id: &str, draft: &EventDraft) -> ChurchResult<()> {
        let values = draft.to_values()?;
        queries::update_event(pool, id, values).await?;
        Ok(())
    }
}

/// Get an event by ID.
pub async fn get_event(pool: &DbPool, id: &str) -> ChurchResult<Event> {
    let row = queries::get_event(pool, id).await?;
    Ok(Event::from_row(row))
}

/// Filter for events dated `today` or later.
pub fn upcoming_filter(today: &str) -> Predicate {
    Predicate::Gte("date", today.to_string())
}

/// Count of events dated today or later.
pub async fn count_upcoming(pool: &DbPool) -> ChurchResult<i64> {
    let today = forms::today_string();
    Ok(db_queries::count(pool, Table::Events, Some(upcoming_filter(&today))).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecclesia_db::init_memory_pool;

    fn draft(name: &str, date: &str, location: &str) -> EventDraft {
        EventDraft {
            name: name.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn upcoming_counts_today_and_later() {
        let pool = init_memory_pool().unwrap();
        let today = forms::today();
        let yesterday = today.pred_opt().unwrap().format(forms::DATE_FORMAT).to_string();
        let next_week = (today + chrono::Days::new(7))
            .format(forms::DATE_FORMAT)
            .to_string();

        Event::insert(&pool, &draft("Past", &yesterday, "")).await.unwrap();
        Event::insert(&pool, &draft("Today", &forms::today_string(), "")).await.unwrap();
        Event::insert(&pool, &draft("Soon", &next_week, "")).await.unwrap();

        assert_eq!(count_upcoming(&pool).await.unwrap(), 2);

        let names: Vec<_> = Event::list(&pool, Event::select())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Soon", "Today", "Past"]);
    }

    #[test]
    fn search_by_name_and_location() {
        let event = Event {
            id: "e-1".to_string(),
            name: "Youth Night".to_string(),
            date: "2024-05-01".to_string(),
            time: None,
            location: Some("Main Hall".to_string()),
            expected_attendees: 0,
            confirmed_attendees: 0,
            description: Some("pizza".to_string()),
            status: EventStatus::Planned,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(event.matches(&SearchTerm::new("youth")));
        assert!(event.matches(&SearchTerm::new("hall")));
        assert!(!event.matches(&SearchTerm::new("pizza")));
    }
}
