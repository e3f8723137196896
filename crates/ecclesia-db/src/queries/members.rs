//! Member-related database queries.

use super::{expect_affected, not_found, select_rows, Select, Table};
use crate::pool::{DbPool, DbResult};
use rusqlite::params;
use uuid::Uuid;

const COLUMNS: &str = "id, name, national_id, phone, email, conversion_date, address,
                       cell_id, status, created_at, updated_at";

/// Member row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub conversion_date: Option<String>,
    pub address: Option<String>,
    pub cell_id: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Member fields written by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberValues {
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub conversion_date: Option<String>,
    pub address: Option<String>,
    pub cell_id: Option<String>,
    pub status: String,
}

fn row_to_member(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemberRow> {
    Ok(MemberRow {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        conversion_date: row.get(5)?,
        address: row.get(6)?,
        cell_id: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Ordered read of the members table.
pub async fn list_members(pool: &DbPool, select: Select) -> DbResult<Vec<MemberRow>> {
    pool.run(move |conn| select_rows(conn, Table::Members, COLUMNS, &select, row_to_member))
        .await
}

/// Get a member by ID.
pub async fn get_member(pool: &DbPool, id: &str) -> DbResult<MemberRow> {
    let id = id.to_string();
    pool.run(move |conn| {
        conn.query_row(
            &format!("SELECT {} FROM members WHERE id = ?1", COLUMNS),
            params![id],
            row_to_member,
        )
        .map_err(not_found(Table::Members, &id))
    })
    .await
}

/// Insert a member. Returns the assigned identifier.
pub async fn create_member(pool: &DbPool, values: MemberValues) -> DbResult<String> {
    let id = Uuid::new_v4().to_string();
    let assigned = id.clone();

    pool.run(move |conn| {
        conn.execute(
            "INSERT INTO members (id, name, national_id, phone, email, conversion_date,
                                  address, cell_id, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                values.name,
                values.national_id,
                values.phone,
                values.email,
                values.conversion_date,
                values.address,
                values.cell_id,
                values.status,
            ],
        )?;
        Ok(())
    })
    .await?;

    tracing::debug!(id = %assigned, "member inserted");
    Ok(assigned)
}

/// Overwrite a member's fields.
pub async fn update_member(pool: &DbPool, id: &str, values: MemberValues) -> DbResult<()> {
    let id = id.to_string();
    pool.run(move |conn| {
        let affected = conn.execute(
            "UPDATE members
             SET name = ?1, national_id = ?2, phone = ?3, email = ?4, conversion_date = ?5,
                 address = ?6, cell_id = ?7, status = ?8, updated_at = datetime('now')
             WHERE id = ?9",
            params![
                values.name,
                values.national_id,
                values.phone,
                values.email,
                values.conversion_date,
                values.address,
                values.cell_id,
                values.status,
                id,
            ],
        )?;
        expect_affected(affected, Table::Members, &id)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{delete, Predicate};
    use crate::DbError;

    fn values(name: &str, status: &str) -> MemberValues {
        MemberValues {
            name: name.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_then_list_by_name() {
        let pool = crate::init_memory_pool().unwrap();
        create_member(&pool, values("Zacarias", "active")).await.unwrap();
        let id = create_member(&pool, values("Ana", "inactive")).await.unwrap();

        let rows = list_members(&pool, Select::ordered_by("name")).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zacarias"]);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].status, "inactive");
    }

    #[tokio::test]
    async fn filter_by_status() {
        let pool = crate::init_memory_pool().unwrap();
        create_member(&pool, values("Ana", "active")).await.unwrap();
        create_member(&pool, values("Bruno", "inactive")).await.unwrap();

        let select = Select::ordered_by("name")
            .filter(Predicate::Eq("status", "active".to_string()));
        let rows = list_members(&pool, select).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ana");
    }

    #[tokio::test]
    async fn update_keeps_identifier() {
        let pool = crate::init_memory_pool().unwrap();
        let id = create_member(&pool, values("Ana", "active")).await.unwrap();

        let mut changed = values("Ana Maria", "transferred");
        changed.email = Some("ana@example.org".to_string());
        update_member(&pool, &id, changed).await.unwrap();

        let row = get_member(&pool, &id).await.unwrap();
        assert_eq!(row.name, "Ana Maria");
        assert_eq!(row.status, "transferred");
        assert_eq!(row.email.as_deref(), Some("ana@example.org"));
        assert_eq!(list_members(&pool, Select::ordered_by("name")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_status_and_dangling_cell() {
        let pool = crate::init_memory_pool().unwrap();
        assert!(create_member(&pool, values("Ana", "archived")).await.is_err());

        let mut dangling = values("Ana", "active");
        dangling.cell_id = Some("no-such-cell".to_string());
        assert!(matches!(
            create_member(&pool, dangling).await,
            Err(DbError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn update_and_get_missing_member() {
        let pool = crate::init_memory_pool().unwrap();
        let err = update_member(&pool, "missing", values("X", "active")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));

        let id = create_member(&pool, values("Ana", "active")).await.unwrap();
        delete(&pool, Table::Members, &id).await.unwrap();
        assert!(matches!(get_member(&pool, &id).await, Err(DbError::NotFound(_))));
    }
}
