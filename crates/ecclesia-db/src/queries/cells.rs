//! Cell-related database queries.

use super::{expect_affected, not_found, select_rows, Select, Table};
use crate::pool::{DbPool, DbResult};
use rusqlite::params;
use uuid::Uuid;

const COLUMNS: &str = "id, name, leader_id, meeting_day, meeting_time, meeting_address,
                       created_at, updated_at";

/// Cell row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRow {
    pub id: String,
    pub name: String,
    pub leader_id: Option<String>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub meeting_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Cell fields written by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellValues {
    pub name: String,
    pub leader_id: Option<String>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub meeting_address: Option<String>,
}

fn row_to_cell(row: &rusqlite::Row<'_>) -> rusqlite::Result<CellRow> {
    Ok(CellRow {
        id: row.get(0)?,
        name: row.get(1)?,
        leader_id: row.get(2)?,
        meeting_day: row.get(3)?,
        meeting_time: row.get(4)?,
        meeting_address: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Ordered read of the cells table.
pub async fn list_cells(pool: &DbPool, select: Select) -> DbResult<Vec<CellRow>> {
    pool.run(move |conn| select_rows(conn, Table::Cells, COLUMNS, &select, row_to_cell))
        .await
}

/// Get a cell by ID.
pub async fn get_cell(pool: &DbPool, id: &str) -> DbResult<CellRow> {
    let id = id.to_string();
    pool.run(move |conn| {
        conn.query_row(
            &format!("SELECT {} FROM cells WHERE id = ?1", COLUMNS),
            params![id],
            row_to_cell,
        )
        .map_err(not_found(Table::Cells, &id))
    })
    .await
}

/// Insert a cell. Returns the assigned identifier.
pub async fn create_cell(pool: &DbPool, values: CellValues) -> DbResult<String> {
    let id = Uuid::new_v4().to_string();
    let assigned = id.clone();

    pool.run(move |conn| {
        conn.execute(
            "INSERT INTO cells (id, name, leader_id, meeting_day, meeting_time, meeting_address)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                values.name,
                values.leader_id,
                values.meeting_day,
                values.meeting_time,
                values.meeting_address,
            ],
        )?;
        Ok(())
    })
    .await?;

    tracing::debug!(id = %assigned, "cell inserted");
    Ok(assigned)
}

/// Overwrite a cell's fields.
pub async fn update_cell(pool: &DbPool, id: &str, values: CellValues) -> DbResult<()> {
    let id = id.to_string();
    pool.run(move |conn| {
        let affected = conn.execute(
            "UPDATE cells
             SET name = ?1, leader_id = ?2, meeting_day = ?3, meeting_time = ?4,
                 meeting_address = ?5, updated_at = datetime('now')
             WHERE id = ?6",
            params![
                values.name,
                values.leader_id,
                values.meeting_day,
                values.meeting_time,
                values.meeting_address,
                id,
            ],
        )?;
        expect_affected(affected, Table::Cells, &id)
    })
    .await
}
