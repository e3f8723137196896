//! Finances page.

use askama::Template;
use async_trait::async_trait;
use ecclesia_core::badge::{Badge, Categorical};
use ecclesia_core::finance::model::{Finance, FinanceDraft};
use ecclesia_core::finance::FinanceSummary;
use ecclesia_core::member::MemberLookup;
use ecclesia_core::ResourceView;
use ecclesia_db::DbPool;

use super::page::{choice_options, filter_options, member_options, or_dash, Frame, SelectOption};
use super::resource::{delete_url, edit_url, open_form, ResourcePage};

#[derive(Template)]
#[template(path = "finances.html")]
struct FinancesTemplate {
    frame: Frame,
    search: String,
    categories: Vec<SelectOption>,
    form: Option<FinanceForm>,
    rows: Vec<FinanceRowView>,
    summary: FinanceSummary,
}

struct FinanceForm {
    action: String,
    heading: String,
    draft: FinanceDraft,
    kinds: Vec<SelectOption>,
    contributors: Vec<SelectOption>,
}

struct FinanceRowView {
    date: String,
    badge: Badge,
    amount: String,
    contributor: String,
    description: String,
    edit_url: String,
    delete_url: String,
}

impl FinanceRowView {
    fn new(finance: &Finance, members: &MemberLookup) -> Self {
        Self {
            date: finance.date.clone(),
            badge: finance.kind.badge(),
            amount: finance.amount.to_string(),
            contributor: members
                .name(finance.member_id.as_deref(), "Anonymous")
                .to_string(),
            description: or_dash(finance.description.as_deref()),
            edit_url: edit_url::<Finance>(&finance.id),
            delete_url: delete_url::<Finance>(&finance.id),
        }
    }
}

#[async_trait]
impl ResourcePage for Finance {
    const PATH: &'static str = "finances";

    type Lookups = MemberLookup;

    async fn lookups(pool: &DbPool) -> MemberLookup {
        MemberLookup::load(pool).await
    }

    fn render(
        frame: Frame,
        view: &ResourceView<Self>,
        members: &MemberLookup,
    ) -> askama::Result<String> {
        let form = open_form(view).map(|open| FinanceForm {
            kinds: choice_options(open.draft.kind),
            contributors: member_options(
                &members.choices(&open.draft.member_id),
                &open.draft.member_id,
                "Anonymous",
            ),
            draft: open.draft.clone(),
            action: open.action,
            heading: open.heading,
        });

        let filtered = view.filtered();
        FinancesTemplate {
            frame,
            search: view.search().to_string(),
            categories: filter_options(view.category()),
            form,
            summary: FinanceSummary::of(&filtered),
            rows: filtered
                .into_iter()
                .map(|f| FinanceRowView::new(f, members))
                .collect(),
        }
        .render()
    }
}
