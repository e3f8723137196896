//! Event-related database queries.

use super::{expect_affected, not_found, select_rows, Select, Table};
use crate::pool::{DbPool, DbResult};
use rusqlite::params;
use uuid::Uuid;

const COLUMNS: &str = "id, name, date, time, location, expected_attendees, confirmed_attendees,
                       description, status, created_at, updated_at";

/// Event row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub expected_attendees: i64,
    pub confirmed_attendees: i64,
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Event fields written by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventValues {
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub expected_attendees: i64,
    pub confirmed_attendees: i64,
    pub description: Option<String>,
    pub status: String,
}

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        time: row.get(3)?,
        location: row.get(4)?,
        expected_attendees: row.get(5)?,
        confirmed_attendees: row.get(6)?,
        description: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Ordered read of the events table.
pub async fn list_events(pool: &DbPool, select: Select) -> DbResult<Vec<EventRow>> {
    pool.run(move |conn| select_rows(conn, Table::Events, COLUMNS, &select, row_to_event))
        .await
}

/// Get an event by ID.
pub async fn get_event(pool: &DbPool, id: &str) -> DbResult<EventRow> {
    let id = id.to_string();
    pool.run(move |conn| {
        conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?1", COLUMNS),
            params![id],
            row_to_event,
        )
        .map_err(not_found(Table::Events, &id))
    })
    .await
}

/// Insert an event. Returns the assigned identifier.
pub async fn create_event(pool: &DbPool, values: EventValues) -> DbResult<String> {
    let id = Uuid::new_v4().to_string();
    let assigned = id.clone();

    pool.run(move |conn| {
        conn.execute(
            "INSERT INTO events (id, name, date, time, location, expected_attendees,
                                 confirmed_attendees, description, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                values.name,
                values.date,
                values.time,
                values.location,
                values.expected_attendees,
                values.confirmed_attendees,
                values.description,
                values.status,
            ],
        )?;
        Ok(())
    })
    .await?;

    tracing::debug!(id = %assigned, "event inserted");
    Ok(assigned)
}

/// Overwrite an event's fields.
pub async fn update_event(pool: &DbPool, id: &str, values: EventValues) -> DbResult<()> {
    let id = id.to_string();
    pool.run(move |conn| {
        let affected = conn.execute(
            "UPDATE events
             SET name = ?1, date = ?2, time = ?3, location = ?4, expected_attendees = ?5,
                 confirmed_attendees = ?6, description = ?7, status = ?8,
                 updated_at = datetime('now')
             WHERE id = ?9",
            params![
                values.name,
                values.date,
                values.time,
                values.location,
                values.expected_attendees,
                values.confirmed_attendees,
                values.description,
                values.status,
                id,
            ],
        )?;
        expect_affected(affected, Table::Events, &id)
    })
    .await
}
