//! Members page.

use askama::Template;
use async_trait::async_trait;
use ecclesia_core::badge::{Badge, Categorical};
use ecclesia_core::cell::model::Cell;
use ecclesia_core::cell::{cell_name, cell_options};
use ecclesia_core::member::model::{Member, MemberDraft};
use ecclesia_core::ResourceView;
use ecclesia_db::DbPool;

use super::page::{choice_options, filter_options, or_dash, Frame, SelectOption};
use super::resource::{delete_url, edit_url, open_form, ResourcePage};

#[derive(Template)]
#[template(path = "members.html")]
struct MembersTemplate {
    frame: Frame,
    search: String,
    categories: Vec<SelectOption>,
    form: Option<MemberForm>,
    rows: Vec<MemberRowView>,
}

struct MemberForm {
    action: String,
    heading: String,
    draft: MemberDraft,
    statuses: Vec<SelectOption>,
    cells: Vec<SelectOption>,
}

struct MemberRowView {
    name: String,
    email: String,
    phone: String,
    cell: String,
    badge: Badge,
    edit_url: String,
    delete_url: String,
}

impl MemberRowView {
    fn new(member: &Member, cells: &[Cell]) -> Self {
        Self {
            name: member.name.clone(),
            email: or_dash(member.email.as_deref()),
            phone: or_dash(member.phone.as_deref()),
            cell: or_dash(cell_name(cells, member.cell_id.as_deref())),
            badge: member.status.badge(),
            edit_url: edit_url::<Member>(&member.id),
            delete_url: delete_url::<Member>(&member.id),
        }
    }
}

fn cell_select(cells: &[Cell], selected: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "No cell", selected.is_empty()))
        .chain(
            cells
                .iter()
                .map(|c| SelectOption::new(c.id.as_str(), c.name.as_str(), c.id == selected)),
        )
        .collect()
}

#[async_trait]
impl ResourcePage for Member {
    const PATH: &'static str = "members";

    type Lookups = Vec<Cell>;

    async fn lookups(pool: &DbPool) -> Vec<Cell> {
        cell_options(pool).await
    }

    fn render(
        frame: Frame,
        view: &ResourceView<Self>,
        cells: &Vec<Cell>,
    ) -> askama::Result<String> {
        let form = open_form(view).map(|open| MemberForm {
            statuses: choice_options(open.draft.status),
            cells: cell_select(cells, &open.draft.cell_id),
            draft: open.draft.clone(),
            action: open.action,
            heading: open.heading,
        });

        MembersTemplate {
            frame,
            search: view.search().to_string(),
            categories: filter_options(view.category()),
            form,
            rows: view
                .filtered()
                .into_iter()
                .map(|m| MemberRowView::new(m, cells))
                .collect(),
        }
        .render()
    }
}
