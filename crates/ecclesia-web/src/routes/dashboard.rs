//! Dashboard page and statistics endpoint.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Json,
};
use ecclesia_core::dashboard::{load_stats, DashboardStats};

use super::api::authorized;
use super::page::{render, require_user, Frame};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    frame: Frame,
    stats: DashboardStats,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    let user = match require_user(state.session.as_ref()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let stats = load_stats(&state.db).await;
    render(&DashboardTemplate {
        frame: Frame::new("dashboard", &user),
        stats,
    })
}

/// GET /api/dashboard
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, (StatusCode, String)> {
    authorized(&state)?;
    Ok(Json(load_stats(&state.db).await))
}
