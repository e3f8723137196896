//! HTML handlers shared by the four record views.
//!
//! Each request builds a [`ResourceView`], fetches, and then drives the
//! editor the same way the page would: open for create or edit, submit,
//! delete with confirmation. Successful writes redirect back to the list;
//! failed ones re-render the page with the error in the alert banner and the
//! submitted draft still in the form.

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use ecclesia_core::{ChurchError, EditMode, Resource, ResourceView};
use ecclesia_db::{DbError, DbPool};
use serde::{de::DeserializeOwned, Deserialize};

use super::page::{render_html, require_user, Frame};
use crate::state::AppState;

/// A record kind with an HTML page.
#[async_trait]
pub trait ResourcePage: Resource {
    /// URL segment, also the navigation key ("members").
    const PATH: &'static str;

    /// Second-table reads the page needs (selector options, names).
    type Lookups: Send + Sync;

    async fn lookups(pool: &DbPool) -> Self::Lookups;

    /// Render the page: filter bar, optional form, list.
    fn render(
        frame: Frame,
        view: &ResourceView<Self>,
        lookups: &Self::Lookups,
    ) -> askama::Result<String>;
}

/// `?q=...&category=...`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirm: String,
}

async fn load<R: ResourcePage>(pool: &DbPool, query: &ListQuery) -> ResourceView<R> {
    let mut view = ResourceView::<R>::new();
    view.set_search(query.q.clone().unwrap_or_default());
    view.set_category_raw(query.category.as_deref().unwrap_or_default());
    view.fetch(pool).await;
    view
}

async fn page<R: ResourcePage>(
    state: &AppState,
    frame: Frame,
    view: &ResourceView<R>,
) -> Response {
    let lookups = R::lookups(&state.db).await;
    render_html(R::render(frame, view, &lookups))
}

fn alert_status(error: &ChurchError) -> StatusCode {
    match error {
        ChurchError::NotFound { .. } | ChurchError::Database(DbError::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

fn list_url<R: ResourcePage>() -> String {
    format!("/{}", R::PATH)
}

pub fn edit_url<R: ResourcePage>(id: &str) -> String {
    format!("/{}/{}/edit", R::PATH, id)
}

pub fn delete_url<R: ResourcePage>(id: &str) -> String {
    format!("/{}/{}/delete", R::PATH, id)
}

/// The open editor, as the form needs it.
pub struct OpenForm<'a, D> {
    pub action: String,
    pub heading: String,
    pub draft: &'a D,
}

pub fn open_form<R: ResourcePage>(view: &ResourceView<R>) -> Option<OpenForm<'_, R::Draft>> {
    let mode = view.editor().mode()?;
    let draft = view.editor().draft()?;
    let (action, heading) = match mode {
        EditMode::Creating => (list_url::<R>(), format!("New {}", R::NOUN)),
        EditMode::Editing(id) => (format!("/{}/{}", R::PATH, id), format!("Edit {}", R::NOUN)),
    };
    Some(OpenForm {
        action,
        heading,
        draft,
    })
}

/// GET /{view}
pub async fn list<R: ResourcePage>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let view = load::<R>(&state.db, &query).await;
    page(&state, Frame::new(R::PATH, &user), &view).await
}

/// GET /{view}/new
pub async fn new_form<R: ResourcePage>(State(state): State<AppState>) -> Response {
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut view = load::<R>(&state.db, &ListQuery::default()).await;
    view.open_create();
    page(&state, Frame::new(R::PATH, &user), &view).await
}

/// GET /{view}/{id}/edit
pub async fn edit_form<R: ResourcePage>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut view = load::<R>(&state.db, &ListQuery::default()).await;
    if let Err(e) = view.open_edit(&id) {
        let frame = Frame::new(R::PATH, &user).with_alert(Some(e.to_string()));
        return (StatusCode::NOT_FOUND, page(&state, frame, &view).await).into_response();
    }
    page(&state, Frame::new(R::PATH, &user), &view).await
}

/// POST /{view}
pub async fn create<R>(State(state): State<AppState>, Form(draft): Form<R::Draft>) -> Response
where
    R: ResourcePage,
    R::Draft: DeserializeOwned,
{
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut view = ResourceView::<R>::new();
    view.open_create();
    view.editor_mut().set_draft(draft);
    submit(&state, &user, view).await
}

/// POST /{view}/{id}
pub async fn update<R>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(draft): Form<R::Draft>,
) -> Response
where
    R: ResourcePage,
    R::Draft: DeserializeOwned,
{
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut view = load::<R>(&state.db, &ListQuery::default()).await;
    if let Err(e) = view.open_edit(&id) {
        let frame = Frame::new(R::PATH, &user).with_alert(Some(e.to_string()));
        return (StatusCode::NOT_FOUND, page(&state, frame, &view).await).into_response();
    }
    view.editor_mut().set_draft(draft);
    submit(&state, &user, view).await
}

async fn submit<R: ResourcePage>(
    state: &AppState,
    user: &ecclesia_core::session::User,
    mut view: ResourceView<R>,
) -> Response {
    match view.submit(&state.db).await {
        Ok(_) => {
            state.table_changed(R::TABLE);
            Redirect::to(&list_url::<R>()).into_response()
        }
        Err(e) => {
            if view.is_loading() {
                view.fetch(&state.db).await;
            }
            let status = alert_status(&e);
            let frame = Frame::new(R::PATH, user).with_alert(Some(e.to_string()));
            (status, page(state, frame, &view).await).into_response()
        }
    }
}

/// POST /{view}/{id}/delete
///
/// Deletes only with `confirm=yes`; anything else leaves the record alone.
pub async fn delete<R: ResourcePage>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let confirmed = form.confirm == "yes";
    let mut view = ResourceView::<R>::new();

    match view.delete(&state.db, &id, confirmed).await {
        Ok(deleted) => {
            if deleted {
                state.table_changed(R::TABLE);
            }
            Redirect::to(&list_url::<R>()).into_response()
        }
        Err(e) => {
            view.fetch(&state.db).await;
            let status = alert_status(&e);
            let frame = Frame::new(R::PATH, &user).with_alert(Some(e.to_string()));
            (status, page(&state, frame, &view).await).into_response()
        }
    }
}
