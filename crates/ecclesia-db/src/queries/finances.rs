//! Finance-related database queries.
//!
//! Amounts are stored as decimal text so no precision is lost between the
//! form and the store.

use super::{expect_affected, not_found, select_rows, Select, Table};
use crate::pool::{DbPool, DbResult};
use rusqlite::params;
use uuid::Uuid;

const COLUMNS: &str = "id, date, kind, amount, member_id, description, created_at, updated_at";

/// Finance row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub member_id: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Finance fields written by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceValues {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub member_id: Option<String>,
    pub description: Option<String>,
}

fn row_to_finance(row: &rusqlite::Row<'_>) -> rusqlite::Result<FinanceRow> {
    Ok(FinanceRow {
        id: row.get(0)?,
        date: row.get(1)?,
        kind: row.get(2)?,
        amount: row.get(3)?,
        member_id: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Ordered read of the finances table.
pub async fn list_finances(pool: &DbPool, select: Select) -> DbResult<Vec<FinanceRow>> {
    pool.run(move |conn| select_rows(conn, Table::Finances, COLUMNS, &select, row_to_finance))
        .await
}

/// Every stored amount, in no particular order.
pub async fn list_amounts(pool: &DbPool) -> DbResult<Vec<String>> {
    pool.run(|conn| {
        let mut stmt = conn.prepare("SELECT amount FROM finances")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    })
    .await
}

/// Get a finance entry by ID.
pub async fn get_finance(pool: &DbPool, id: &str) -> DbResult<FinanceRow> {
    let id = id.to_string();
    pool.run(move |conn| {
        conn.query_row(
            &format!("SELECT {} FROM finances WHERE id = ?1", COLUMNS),
            params![id],
            row_to_finance,
        )
        .map_err(not_found(Table::Finances, &id))
    })
    .await
}

/// Insert a finance entry. Returns the assigned identifier.
pub async fn create_finance(pool: &DbPool, values: FinanceValues) -> DbResult<String> {
    let id = Uuid::new_v4().to_string();
    let assigned = id.clone();

    pool.run(move |conn| {
        conn.execute(
            "INSERT INTO finances (id, date, kind, amount, member_id, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                values.date,
                values.kind,
                values.amount,
                values.member_id,
                values.description,
            ],
        )?;
        Ok(())
    })
    .await?;

    tracing::debug!(id = %assigned, "finance entry inserted");
    Ok(assigned)
}

/// Overwrite a finance entry's fields.
pub async fn update_finance(pool: &DbPool, id: &str, values: FinanceValues) -> DbResult<()> {
    let id = id.to_string();
    pool.run(move |conn| {
        let affected = conn.execute(
            "UPDATE finances
             SET date = ?1, kind = ?2, amount = ?3, member_id = ?4, description = ?5,
                 updated_at = datetime('now')
             WHERE id = ?6",
            params![
                values.date,
                values.kind,
                values.amount,
                values.member_id,
                values.description,
                id,
            ],
        )?;
        expect_affected(affected, Table::Finances, &id)
    })
    .await
}
