//! Member management.

pub mod model;

use crate::badge::Categorical;
use crate::error::ChurchResult;
use crate::resource::{lookup, Resource, SearchTerm};
use async_trait::async_trait;
use ecclesia_db::queries::members as queries;
use ecclesia_db::{DbPool, Predicate, Select, Table};
use model::{Member, MemberDraft, MemberStatus};

#[async_trait]
impl Resource for Member {
    type Draft = MemberDraft;
    type Category = MemberStatus;

    const TABLE: Table = Table::Members;
    const NOUN: &'static str = "member";

    fn id(&self) -> &str {
        &self.id
    }

    fn select() -> Select {
        Select::ordered_by("name")
    }

    fn to_draft(&self) -> MemberDraft {
        MemberDraft::from_member(self)
    }

    fn matches(&self, term: &SearchTerm) -> bool {
        term.matches_text(Some(&self.name))
            || term.matches_text(self.email.as_deref())
            || term.matches_exact(self.national_id.as_deref())
    }

    fn category(&self) -> Option<MemberStatus> {
        Some(self.status)
    }

    async fn list(pool: &DbPool, select: Select) -> ChurchResult<Vec<Self>> {
        let rows = queries::list_members(pool, select).await?;
        Ok(rows.into_iter().map(Member::from_row).collect())
    }

    async fn insert(pool: &DbPool, draft: &MemberDraft) -> ChurchResult<String> {
        let values = draft.to_values()?;
        Ok(queries::create_member(pool, values).await?)
    }

    async fn update(pool: &DbPool, id: &str, draft: &MemberDraft) -> ChurchResult<()> {
        let values = draft.to_values()?;
        queries::update_member(pool, id, values).await?;
        Ok(())
    }
}

/// Get a member by ID.
pub async fn get_member(pool: &DbPool, id: &str) -> ChurchResult<Member> {
    let row = queries::get_member(pool, id).await?;
    Ok(Member::from_row(row))
}

/// Read of active members, by name.
pub fn active_select() -> Select {
    Select::ordered_by("name").filter(Predicate::Eq(
        "status",
        MemberStatus::Active.as_str().to_string(),
    ))
}

/// Active members for leader and contributor selectors. Failures are logged
/// and give an empty list.
pub async fn active_members(pool: &DbPool) -> Vec<Member> {
    lookup::<Member>(pool, active_select()).await
}

/// Every member by name, whatever the status, for resolving references.
pub async fn all_members(pool: &DbPool) -> Vec<Member> {
    lookup::<Member>(pool, Member::select()).await
}

/// Member reads behind a view that both names members and offers them in a
/// selector.
#[derive(Debug, Clone, Default)]
pub struct MemberLookup {
    /// Every member; display names resolve against this.
    pub all: Vec<Member>,
    /// Active members; selectors offer these.
    pub active: Vec<Member>,
}

impl MemberLookup {
    /// Issue both reads concurrently. Each failure is logged and leaves its
    /// list empty.
    pub async fn load(pool: &DbPool) -> Self {
        let (all, active) = tokio::join!(all_members(pool), active_members(pool));
        Self { all, active }
    }

    pub fn name<'a>(&'a self, id: Option<&str>, absent: &'a str) -> &'a str {
        member_name(&self.all, id, absent)
    }

    /// Selector choices: the active members, plus the member `selected`
    /// refers to when it is no longer active. An untouched form then submits
    /// the reference it was opened with.
    pub fn choices(&self, selected: &str) -> Vec<&Member> {
        let mut choices: Vec<&Member> = self.active.iter().collect();
        if !selected.is_empty() && !self.active.iter().any(|m| m.id == selected) {
            if let Some(member) = self.all.iter().find(|m| m.id == selected) {
                choices.push(member);
            }
        }
        choices
    }
}

/// Display name of an optional member reference.
///
/// `None` gives `absent`; an identifier missing from `members` gives
/// "Unknown".
pub fn member_name<'a>(members: &'a [Member], id: Option<&str>, absent: &'a str) -> &'a str {
    match id {
        None => absent,
        Some(id) => members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
            .unwrap_or("Unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecclesia_db::init_memory_pool;

    async fn add(pool: &DbPool, name: &str, status: MemberStatus) -> String {
        let draft = MemberDraft {
            name: name.to_string(),
            status,
            ..Default::default()
        };
        Member::insert(pool, &draft).await.unwrap()
    }

    #[tokio::test]
    async fn active_lookup_skips_inactive() {
        let pool = init_memory_pool().unwrap();
        add(&pool, "Bruno", MemberStatus::Active).await;
        add(&pool, "Ana", MemberStatus::Active).await;
        add(&pool, "Carla", MemberStatus::Transferred).await;

        let names: Vec<_> = active_members(&pool)
            .await
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[tokio::test]
    async fn lookup_keeps_inactive_selection() {
        let pool = init_memory_pool().unwrap();
        let ana = add(&pool, "Ana", MemberStatus::Active).await;
        let bruno = add(&pool, "Bruno", MemberStatus::Inactive).await;
        add(&pool, "Carla", MemberStatus::Transferred).await;

        let members = MemberLookup::load(&pool).await;
        assert_eq!(members.all.len(), 3);
        assert_eq!(members.active.len(), 1);
        assert_eq!(members.name(Some(bruno.as_str()), "Anonymous"), "Bruno");

        let names = |selected: &str| -> Vec<String> {
            members
                .choices(selected)
                .into_iter()
                .map(|m| m.name.clone())
                .collect()
        };
        assert_eq!(names(""), vec!["Ana"]);
        assert_eq!(names(ana.as_str()), vec!["Ana"]);
        assert_eq!(names(bruno.as_str()), vec!["Ana", "Bruno"]);
        assert_eq!(names("gone"), vec!["Ana"]);
    }

    #[tokio::test]
    async fn update_then_get() {
        let pool = init_memory_pool().unwrap();
        let id = add(&pool, "Ana", MemberStatus::Active).await;

        let mut draft = get_member(&pool, &id).await.unwrap().to_draft();
        draft.email = "ana@example.com".to_string();
        Member::update(&pool, &id, &draft).await.unwrap();

        let member = get_member(&pool, &id).await.unwrap();
        assert_eq!(member.id, id);
        assert_eq!(member.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn search_fields() {
        let member = Member {
            id: "m-1".to_string(),
            name: "Maria Silva".to_string(),
            national_id: Some("123.456.789-00".to_string()),
            phone: None,
            email: Some("MARIA@church.org".to_string()),
            conversion_date: None,
            address: Some("Rua das Flores".to_string()),
            cell_id: None,
            status: MemberStatus::Active,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(member.matches(&SearchTerm::new("silva")));
        assert!(member.matches(&SearchTerm::new("maria@")));
        assert!(member.matches(&SearchTerm::new("456.789")));
        assert!(!member.matches(&SearchTerm::new("flores")));

        let members = vec![member];
        assert_eq!(member_name(&members, Some("m-1"), "Anonymous"), "Maria Silva");
        assert_eq!(member_name(&members, Some("gone"), "Anonymous"), "Unknown");
        assert_eq!(member_name(&members, None, "Anonymous"), "Anonymous");
    }
}
