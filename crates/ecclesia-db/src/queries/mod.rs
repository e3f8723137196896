//! Database query implementations.
//!
//! Reads are described by a [`Select`]: one ordering column, a direction and
//! an optional single-column predicate. Column names are checked against a
//! per-table whitelist before any SQL is built.

pub mod cells;
pub mod events;
pub mod finances;
pub mod members;

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// The four tables of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Members,
    Cells,
    Finances,
    Events,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Cells => "cells",
            Self::Finances => "finances",
            Self::Events => "events",
        }
    }

    /// Columns that may appear in ORDER BY or WHERE.
    fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Members => &[
                "id", "name", "national_id", "phone", "email", "conversion_date",
                "address", "cell_id", "status", "created_at", "updated_at",
            ],
            Self::Cells => &[
                "id", "name", "leader_id", "meeting_day", "meeting_time",
                "meeting_address", "created_at", "updated_at",
            ],
            Self::Finances => &[
                "id", "date", "kind", "amount", "member_id", "description",
                "created_at", "updated_at",
            ],
            Self::Events => &[
                "id", "name", "date", "time", "location", "expected_attendees",
                "confirmed_attendees", "description", "status", "created_at", "updated_at",
            ],
        }
    }

    fn check_column(&self, column: &str) -> DbResult<()> {
        if self.columns().contains(&column) {
            Ok(())
        } else {
            Err(DbError::InvalidColumn {
                table: self.as_str().to_string(),
                column: column.to_string(),
            })
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(&'static str, String),
    Gte(&'static str, String),
}

impl Predicate {
    fn column(&self) -> &'static str {
        match self {
            Self::Eq(column, _) | Self::Gte(column, _) => *column,
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Eq(_, value) | Self::Gte(_, value) => value,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Self::Eq(..) => "=",
            Self::Gte(..) => ">=",
        }
    }
}

/// An ordered read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub order_by: &'static str,
    pub ascending: bool,
    pub filter: Option<Predicate>,
}

impl Select {
    /// Ascending read ordered by `column`.
    pub fn ordered_by(column: &'static str) -> Self {
        Self {
            order_by: column,
            ascending: true,
            filter: None,
        }
    }

    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Build the SQL for this read. Returns the statement and the bound
    /// filter value, if any.
    fn to_sql(&self, table: Table, projection: &str) -> DbResult<(String, Option<String>)> {
        table.check_column(self.order_by)?;

        let mut sql = format!("SELECT {} FROM {}", projection, table.as_str());
        let mut bound = None;

        if let Some(predicate) = &self.filter {
            table.check_column(predicate.column())?;
            sql.push_str(&format!(" WHERE {} {} ?1", predicate.column(), predicate.operator()));
            bound = Some(predicate.value().to_string());
        }

        // id as tiebreaker keeps equal keys in a stable order across reads.
        sql.push_str(&format!(
            " ORDER BY {} {}, id ASC",
            self.order_by,
            if self.ascending { "ASC" } else { "DESC" }
        ));

        Ok((sql, bound))
    }
}

/// Run a [`Select`] and map each row.
pub(crate) fn select_rows<T, F>(
    conn: &rusqlite::Connection,
    table: Table,
    projection: &str,
    select: &Select,
    map: F,
) -> DbResult<Vec<T>>
where
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let (sql, bound) = select.to_sql(table, projection)?;
    let mut stmt = conn.prepare(&sql)?;

    let rows = match bound {
        Some(value) => stmt.query_map(params![value], map)?.collect::<Result<Vec<_>, _>>(),
        None => stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>(),
    };

    rows.map_err(DbError::from)
}

/// Count rows, optionally filtered.
pub async fn count(pool: &DbPool, table: Table, filter: Option<Predicate>) -> DbResult<i64> {
    if let Some(predicate) = &filter {
        table.check_column(predicate.column())?;
    }

    pool.run(move |conn| {
        let count: i64 = match &filter {
            Some(predicate) => conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} {} ?1",
                    table.as_str(),
                    predicate.column(),
                    predicate.operator()
                ),
                params![predicate.value()],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table.as_str()),
                [],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    })
    .await
}

/// Delete a record by identifier.
pub async fn delete(pool: &DbPool, table: Table, id: &str) -> DbResult<()> {
    let id = id.to_string();
    pool.run(move |conn| {
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", table.as_str()),
            params![id],
        )?;
        if affected == 0 {
            return Err(DbError::NotFound(format!("{}: {}", table, id)));
        }
        tracing::debug!(table = %table, id = %id, "record deleted");
        Ok(())
    })
    .await
}

/// Map "no rows" to [`DbError::NotFound`].
pub(crate) fn not_found(table: Table, id: &str) -> impl FnOnce(rusqlite::Error) -> DbError + '_ {
    move |e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("{}: {}", table, id)),
        e => DbError::Connection(e),
    }
}

/// Fail an update that touched nothing.
pub(crate) fn expect_affected(affected: usize, table: Table, id: &str) -> DbResult<()> {
    if affected == 0 {
        Err(DbError::NotFound(format!("{}: {}", table, id)))
    } else {
        Ok(())
    }
}
