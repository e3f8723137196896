//! Sign-out.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};

use crate::state::AppState;

/// POST /logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.session.sign_out();
    Redirect::to("/")
}
