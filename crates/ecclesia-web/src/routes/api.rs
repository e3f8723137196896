//! JSON API over the four record kinds.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ecclesia_core::{ChurchError, Resource, ResourceView};
use ecclesia_db::DbError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use super::resource::ListQuery;
use crate::state::AppState;

type ApiError = (StatusCode, String);

fn api_error(e: ChurchError) -> ApiError {
    let status = match &e {
        ChurchError::NotFound { .. } | ChurchError::Database(DbError::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

/// 401 unless a user is signed in and the session has settled.
pub(crate) fn authorized(state: &AppState) -> Result<(), ApiError> {
    if state.session.is_loading() || state.session.current_user().is_none() {
        return Err((StatusCode::UNAUTHORIZED, "Sign-in required".to_string()));
    }
    Ok(())
}

/// GET /api/{view}?q=&category=
pub async fn list<R>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<R>>, ApiError>
where
    R: Resource + Serialize,
{
    authorized(&state)?;

    let mut view = ResourceView::<R>::new();
    view.set_search(query.q.unwrap_or_default());
    view.set_category_raw(query.category.as_deref().unwrap_or_default());
    view.fetch(&state.db).await;

    Ok(Json(view.filtered().into_iter().cloned().collect()))
}

/// POST /api/{view}
pub async fn create<R>(
    State(state): State<AppState>,
    Json(draft): Json<R::Draft>,
) -> Result<(StatusCode, Json<Value>), ApiError>
where
    R: Resource,
    R::Draft: DeserializeOwned,
{
    authorized(&state)?;

    let id = R::insert(&state.db, &draft).await.map_err(api_error)?;
    state.table_changed(R::TABLE);

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// PUT /api/{view}/{id}
pub async fn update<R>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<Value>, ApiError>
where
    R: Resource,
    R::Draft: DeserializeOwned,
{
    authorized(&state)?;

    R::update(&state.db, &id, &draft).await.map_err(api_error)?;
    state.table_changed(R::TABLE);

    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/{view}/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorized(&state)?;

    R::delete(&state.db, &id).await.map_err(api_error)?;
    state.table_changed(R::TABLE);

    Ok(StatusCode::NO_CONTENT)
}
