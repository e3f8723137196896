//! Events page.

use askama::Template;
use async_trait::async_trait;
use ecclesia_core::badge::{Badge, Categorical};
use ecclesia_core::event::model::{Event, EventDraft};
use ecclesia_core::ResourceView;
use ecclesia_db::DbPool;

use super::page::{choice_options, filter_options, or_dash, Frame, SelectOption};
use super::resource::{delete_url, edit_url, open_form, ResourcePage};

#[derive(Template)]
#[template(path = "events.html")]
struct EventsTemplate {
    frame: Frame,
    search: String,
    categories: Vec<SelectOption>,
    form: Option<EventForm>,
    rows: Vec<EventRowView>,
}

struct EventForm {
    action: String,
    heading: String,
    draft: EventDraft,
    statuses: Vec<SelectOption>,
}

struct EventRowView {
    name: String,
    when: String,
    location: String,
    attendance: String,
    badge: Badge,
    edit_url: String,
    delete_url: String,
}

impl EventRowView {
    fn new(event: &Event) -> Self {
        let when = match &event.time {
            Some(time) => format!("{} {}", event.date, time),
            None => event.date.clone(),
        };
        Self {
            name: event.name.clone(),
            when,
            location: or_dash(event.location.as_deref()),
            attendance: event.attendance(),
            badge: event.status.badge(),
            edit_url: edit_url::<Event>(&event.id),
            delete_url: delete_url::<Event>(&event.id),
        }
    }
}

#[async_trait]
impl ResourcePage for Event {
    const PATH: &'static str = "events";

    type Lookups = ();

    async fn lookups(_pool: &DbPool) -> Self::Lookups {}

    fn render(frame: Frame, view: &ResourceView<Self>, _: &()) -> askama::Result<String> {
        let form = open_form(view).map(|open| EventForm {
            statuses: choice_options(open.draft.status),
            draft: open.draft.clone(),
            action: open.action,
            heading: open.heading,
        });

        EventsTemplate {
            frame,
            search: view.search().to_string(),
            categories: filter_options(view.category()),
            form,
            rows: view.filtered().into_iter().map(EventRowView::new).collect(),
        }
        .render()
    }
}
