//! Cell (small group) management.

pub mod model;

use crate::badge::NoCategory;
use crate::error::ChurchResult;
use crate::member::model::Member;
use crate::member::member_name;
use crate::resource::{lookup, Resource, SearchTerm};
use async_trait::async_trait;
use ecclesia_db::queries::cells as queries;
use ecclesia_db::{DbPool, Select, Table};
use model::{Cell, CellDraft};

/// Number of member names shown on a cell card.
pub const PREVIEW_LEN: usize = 3;

#[async_trait]
impl Resource for Cell {
    type Draft = CellDraft;
    type Category = NoCategory;

    const TABLE: Table = Table::Cells;
    const NOUN: &'static str = "cell";

    fn id(&self) -> &str {
        &self.id
    }

    fn select() -> Select {
        Select::ordered_by("name")
    }

    fn to_draft(&self) -> CellDraft {
        CellDraft::from_cell(self)
    }

    fn matches(&self, term: &SearchTerm) -> bool {
        term.matches_text(Some(&self.name)) || term.matches_text(self.meeting_address.as_deref())
    }

    fn category(&self) -> Option<NoCategory> {
        None
    }

    async fn list(pool: &DbPool, select: Select) -> ChurchResult<Vec<Self>> {
        let rows = queries::list_cells(pool, select).await?;
        Ok(rows.into_iter().map(Cell::from_row).collect())
    }

    async fn insert(pool: &DbPool, draft: &CellDraft) -> ChurchResult<String> {
        let values = draft.to_values()?;
        Ok(queries::create_cell(pool, values).await?)
    }

    async fn update(pool: &DbPool, id: &str, draft: &CellDraft) -> ChurchResult<()> {
        let values = draft.to_values()?;
        queries::update_cell(pool, id, values).await?;
        Ok(())
    }
}

/// Get a cell by ID.
pub async fn get_cell(pool: &DbPool, id: &str) -> ChurchResult<Cell> {
    let row = queries::get_cell(pool, id).await?;
    Ok(Cell::from_row(row))
}

/// All cells by name, for the member form's selector.
pub async fn cell_options(pool: &DbPool) -> Vec<Cell> {
    lookup::<Cell>(pool, Cell::select()).await
}

/// Name of a member's cell, if it has one.
pub fn cell_name<'a>(cells: &'a [Cell], id: Option<&str>) -> Option<&'a str> {
    let id = id?;
    cells.iter().find(|c| c.id == id).map(|c| c.name.as_str())
}

/// Leader name: "No leader" when unset, "Unknown" when the leader is not
/// among `members`.
pub fn leader_name<'a>(cell: &Cell, members: &'a [Member]) -> &'a str {
    member_name(members, cell.leader_id.as_deref(), "No leader")
}

/// Members belonging to `cell`, in the order given.
pub fn members_of<'a>(cell: &Cell, members: &'a [Member]) -> Vec<&'a Member> {
    members
        .iter()
        .filter(|m| m.cell_id.as_deref() == Some(cell.id.as_str()))
        .collect()
}

/// Up to [`PREVIEW_LEN`] names, followed by "+N others" when there are more.
pub fn member_preview(members: &[&Member]) -> Option<String> {
    if members.is_empty() {
        return None;
    }

    let names: Vec<&str> = members
        .iter()
        .take(PREVIEW_LEN)
        .map(|m| m.name.as_str())
        .collect();
    let mut preview = names.join(", ");

    let rest = members.len().saturating_sub(PREVIEW_LEN);
    if rest > 0 {
        preview.push_str(&format!(" +{} others", rest));
    }
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::model::{MemberDraft, MemberStatus};
    use ecclesia_db::init_memory_pool;

    fn member(id: &str, name: &str, cell_id: Option<&str>) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            national_id: None,
            phone: None,
            email: None,
            conversion_date: None,
            address: None,
            cell_id: cell_id.map(str::to_string),
            status: MemberStatus::Active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn cell(leader_id: Option<&str>) -> Cell {
        Cell {
            id: "c-1".to_string(),
            name: "Vida Nova".to_string(),
            leader_id: leader_id.map(str::to_string),
            meeting_day: None,
            meeting_time: None,
            meeting_address: Some("Rua A, 10".to_string()),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn leader_names() {
        let members = vec![member("m-1", "Ana", None)];
        assert_eq!(leader_name(&cell(None), &members), "No leader");
        assert_eq!(leader_name(&cell(Some("m-1")), &members), "Ana");
        assert_eq!(leader_name(&cell(Some("m-9")), &members), "Unknown");
    }

    #[test]
    fn preview_truncates_after_three() {
        let members: Vec<Member> = ["Ana", "Bruno", "Carla", "Davi", "Elis"]
            .iter()
            .enumerate()
            .map(|(i, n)| member(&format!("m-{}", i), n, Some("c-1")))
            .chain(std::iter::once(member("x", "Outsider", Some("c-2"))))
            .collect();

        let of = members_of(&cell(None), &members);
        assert_eq!(of.len(), 5);
        assert_eq!(
            member_preview(&of).unwrap(),
            "Ana, Bruno, Carla +2 others"
        );
        assert_eq!(member_preview(&of[..2]).unwrap(), "Ana, Bruno");
        assert_eq!(member_preview(&[]), None);
    }

    #[test]
    fn search_by_name_and_address() {
        let c = cell(None);
        assert!(c.matches(&SearchTerm::new("vida")));
        assert!(c.matches(&SearchTerm::new("rua a")));
        assert!(!c.matches(&SearchTerm::new("centro")));
    }

    #[tokio::test]
    async fn deleting_leader_clears_reference() {
        let pool = init_memory_pool().unwrap();
        let leader = Member::insert(
            &pool,
            &MemberDraft {
                name: "Ana".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let id = Cell::insert(
            &pool,
            &CellDraft {
                name: "Vida Nova".to_string(),
                leader_id: leader.clone(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        Member::delete(&pool, &leader).await.unwrap();
        let cell = get_cell(&pool, &id).await.unwrap();
        assert_eq!(cell.leader_id, None);

        let dangling = CellDraft {
            name: "Other".to_string(),
            leader_id: leader,
            ..Default::default()
        };
        assert!(Cell::insert(&pool, &dangling).await.is_err());
        assert_eq!(cell_options(&pool).await.len(), 1);
        assert_eq!(cell_name(&[cell], Some(id.as_str())), Some("Vida Nova"));
    }
}
