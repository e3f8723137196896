//! Cells page.

use askama::Template;
use async_trait::async_trait;
use ecclesia_core::cell::model::{Cell, CellDraft};
use ecclesia_core::cell::{leader_name, member_preview, members_of};
use ecclesia_core::member::MemberLookup;
use ecclesia_core::ResourceView;
use ecclesia_db::DbPool;

use super::page::{member_options, or_dash, Frame, SelectOption};
use super::resource::{delete_url, edit_url, open_form, ResourcePage};

#[derive(Template)]
#[template(path = "cells.html")]
struct CellsTemplate {
    frame: Frame,
    search: String,
    categories: Vec<SelectOption>,
    form: Option<CellForm>,
    rows: Vec<CellCardView>,
}

struct CellForm {
    action: String,
    heading: String,
    draft: CellDraft,
    leaders: Vec<SelectOption>,
}

struct CellCardView {
    name: String,
    leader: String,
    schedule: String,
    address: String,
    member_count: usize,
    preview: String,
    edit_url: String,
    delete_url: String,
}

impl CellCardView {
    fn new(cell: &Cell, members: &MemberLookup) -> Self {
        let of = members_of(cell, &members.active);
        Self {
            name: cell.name.clone(),
            leader: leader_name(cell, &members.all).to_string(),
            schedule: or_dash(cell.schedule().as_deref()),
            address: or_dash(cell.meeting_address.as_deref()),
            member_count: of.len(),
            preview: member_preview(&of).unwrap_or_default(),
            edit_url: edit_url::<Cell>(&cell.id),
            delete_url: delete_url::<Cell>(&cell.id),
        }
    }
}

#[async_trait]
impl ResourcePage for Cell {
    const PATH: &'static str = "cells";

    type Lookups = MemberLookup;

    async fn lookups(pool: &DbPool) -> MemberLookup {
        MemberLookup::load(pool).await
    }

    fn render(
        frame: Frame,
        view: &ResourceView<Self>,
        members: &MemberLookup,
    ) -> askama::Result<String> {
        let form = open_form(view).map(|open| CellForm {
            leaders: member_options(
                &members.choices(&open.draft.leader_id),
                &open.draft.leader_id,
                "No leader",
            ),
            draft: open.draft.clone(),
            action: open.action,
            heading: open.heading,
        });

        CellsTemplate {
            frame,
            search: view.search().to_string(),
            categories: Vec::new(),
            form,
            rows: view
                .filtered()
                .into_iter()
                .map(|c| CellCardView::new(c, members))
                .collect(),
        }
        .render()
    }
}
