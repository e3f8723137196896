//! Ecclesia Web Server
//!
//! Axum-based server for the church-management pages, a JSON API and the
//! WebSocket change feed.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post, put},
    Router,
};
use ecclesia_core::cell::model::Cell;
use ecclesia_core::event::model::Event;
use ecclesia_core::finance::model::Finance;
use ecclesia_core::member::model::Member;
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{api, resource, resource::ResourcePage};
use state::AppState;

/// HTML and JSON routes for one record kind.
fn resource_routes<R>() -> Router<AppState>
where
    R: ResourcePage + Serialize,
    R::Draft: DeserializeOwned,
{
    let base = format!("/{}", R::PATH);

    Router::new()
        .route(&base, get(resource::list::<R>).post(resource::create::<R>))
        .route(&format!("{}/new", base), get(resource::new_form::<R>))
        .route(&format!("{}/{{id}}", base), post(resource::update::<R>))
        .route(&format!("{}/{{id}}/edit", base), get(resource::edit_form::<R>))
        .route(&format!("{}/{{id}}/delete", base), post(resource::delete::<R>))
        .route(
            &format!("/api{}", base),
            get(api::list::<R>).post(api::create::<R>),
        )
        .route(
            &format!("/api{}/{{id}}", base),
            put(api::update::<R>).delete(api::delete::<R>),
        )
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/api/dashboard", get(routes::dashboard::stats))
        .route("/logout", post(routes::session::logout))
        .route("/ws", get(websocket::ws_handler))
        .merge(resource_routes::<Member>())
        .merge(resource_routes::<Cell>())
        .merge(resource_routes::<Finance>())
        .merge(resource_routes::<Event>())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use ecclesia_core::cell::model::CellDraft;
    use ecclesia_core::finance::get_finance;
    use ecclesia_core::finance::model::FinanceDraft;
    use ecclesia_core::member::model::{MemberDraft, MemberStatus};
    use ecclesia_core::session::{LocalSession, SessionProvider, User};
    use ecclesia_core::Resource;
    use ecclesia_db::{init_memory_pool, Table, WebSocketMessage};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state(session: LocalSession) -> AppState {
        let db = Arc::new(init_memory_pool().unwrap());
        AppState::new(db, Arc::new(session))
    }

    fn signed_in() -> AppState {
        app_state(LocalSession::signed_in("pastor@church.org"))
    }

    async fn send(state: &AppState, request: Request<Body>) -> Response {
        create_router(state.clone()).oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn pages_require_sign_in() {
        let state = app_state(LocalSession::new(None));

        let response = send(&state, get("/members")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Sign-in required"));

        let response = send(&state, get("/api/dashboard")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    struct ResolvingSession;

    impl SessionProvider for ResolvingSession {
        fn current_user(&self) -> Option<User> {
            Some(User::new("pastor@church.org"))
        }

        fn is_loading(&self) -> bool {
            true
        }

        fn sign_out(&self) {}
    }

    #[tokio::test]
    async fn loading_session_is_not_signed_in() {
        let db = Arc::new(init_memory_pool().unwrap());
        let state = AppState::new(db, Arc::new(ResolvingSession));

        let response = send(&state, get("/api/dashboard")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&state, get("/api/members")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&state, get("/")).await;
        assert!(body_text(response).await.contains("Loading..."));
    }

    #[tokio::test]
    async fn dashboard_shows_user() {
        let state = signed_in();
        let response = send(&state, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("pastor@church.org"));
        assert!(html.contains(">P<"));
    }

    #[tokio::test]
    async fn create_member_then_list() {
        let state = signed_in();
        let mut rx = state.tx.subscribe();

        let response = send(&state, post_form("/members", "name=Ana+Souza&status=inactive")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/members");
        assert_eq!(
            rx.try_recv().unwrap(),
            WebSocketMessage::TableChanged {
                table: Table::Members
            }
        );

        let html = body_text(send(&state, get("/members")).await).await;
        assert_eq!(html.matches("Ana Souza").count(), 1);
        assert!(html.contains("badge badge-gray"));

        let html = body_text(send(&state, get("/members?q=nobody&category=all")).await).await;
        assert!(html.contains("Nothing found."));
    }

    #[tokio::test]
    async fn invalid_submit_keeps_draft() {
        let state = signed_in();
        let response = send(&state, post_form("/events", "name=&location=Main+Hall")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = body_text(response).await;
        assert!(html.contains("Name is required"));
        assert!(html.contains("value=\"Main Hall\""));
        assert!(html.contains("class=\"editor\""));
    }

    #[tokio::test]
    async fn edit_form_and_update() {
        let state = signed_in();
        let draft = CellDraft {
            name: "Vida Nova".to_string(),
            ..Default::default()
        };
        let id = Cell::insert(&state.db, &draft).await.unwrap();

        let html = body_text(send(&state, get(&format!("/cells/{}/edit", id))).await).await;
        assert!(html.contains("Edit cell"));
        assert!(html.contains("value=\"Vida Nova\""));

        let response = send(
            &state,
            post_form(&format!("/cells/{}", id), "name=Vida+Plena&meeting_day=Friday"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(send(&state, get("/cells")).await).await;
        assert!(html.contains("Vida Plena"));
        assert!(!html.contains("Vida Nova"));
        assert!(html.contains("No leader"));

        let response = send(&state, get("/cells/missing/edit")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let state = signed_in();
        let response = send(
            &state,
            json_request(
                "POST",
                "/api/finances",
                serde_json::json!({ "date": "2024-03-10", "kind": "offering", "amount": "12.30" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let uri = format!("/finances/{}/delete", id);
        let response = send(&state, post_form(&uri, "confirm=no")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let html = body_text(send(&state, get("/finances")).await).await;
        assert!(html.contains("12.30"));
        assert!(html.contains("1 entries, total 12.30"));

        let response = send(&state, post_form(&uri, "confirm=yes")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let html = body_text(send(&state, get("/finances")).await).await;
        assert!(html.contains("Nothing found."));

        let response = send(&state, post_form(&uri, "confirm=yes")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn json_api_round_trip() {
        let state = signed_in();
        let response = send(
            &state,
            json_request(
                "POST",
                "/api/events",
                serde_json::json!({
                    "name": "Youth Night",
                    "date": "2099-05-01",
                    "expected_attendees": "40",
                    "status": "confirmed"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let response = send(
            &state,
            json_request(
                "PUT",
                &format!("/api/events/{}", id),
                serde_json::json!({ "name": "Youth Night", "date": "2099-05-01", "status": "cancelled" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let listed: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(send(&state, get("/api/events?category=cancelled")).await).await)
                .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id.as_str());
        assert_eq!(listed[0]["expected_attendees"], 0);

        let stats: serde_json::Value =
            serde_json::from_str(&body_text(send(&state, get("/api/dashboard")).await).await)
                .unwrap();
        assert_eq!(stats["upcoming_events"], 1);
        assert_eq!(stats["total_revenue"], "0");

        let response = send(
            &state,
            json_request("POST", "/api/members", serde_json::json!({ "name": "" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &state,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/events/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn inactive_member_references_survive_edit() {
        let state = signed_in();
        let mut ana = MemberDraft {
            name: "Ana".to_string(),
            ..Default::default()
        };
        let ana_id = Member::insert(&state.db, &ana).await.unwrap();

        let entry = FinanceDraft {
            date: "2024-03-10".to_string(),
            amount: "50".to_string(),
            member_id: ana_id.clone(),
            ..Default::default()
        };
        let finance_id = Finance::insert(&state.db, &entry).await.unwrap();
        let cell = CellDraft {
            name: "Vida Nova".to_string(),
            leader_id: ana_id.clone(),
            ..Default::default()
        };
        let cell_id = Cell::insert(&state.db, &cell).await.unwrap();

        ana.status = MemberStatus::Inactive;
        Member::update(&state.db, &ana_id, &ana).await.unwrap();
        let selected = format!("<option value=\"{}\" selected>Ana</option>", ana_id);

        let html = body_text(send(&state, get("/finances")).await).await;
        assert!(html.contains("Ana"));
        assert!(!html.contains("Unknown"));

        let html = body_text(send(&state, get(&format!("/finances/{}/edit", finance_id))).await).await;
        assert!(html.contains(&selected));

        let html = body_text(send(&state, get("/cells")).await).await;
        assert!(html.contains("Ana"));
        assert!(!html.contains("Unknown"));

        let html = body_text(send(&state, get(&format!("/cells/{}/edit", cell_id))).await).await;
        assert!(html.contains(&selected));

        let form = format!(
            "date=2024-03-10&kind=tithe&amount=50.00&member_id={}&description=",
            ana_id
        );
        let response = send(&state, post_form(&format!("/finances/{}", finance_id), &form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let saved = get_finance(&state.db, &finance_id).await.unwrap();
        assert_eq!(saved.member_id.as_deref(), Some(ana_id.as_str()));
    }

    #[tokio::test]
    async fn unknown_category_matches_nothing() {
        let state = signed_in();
        let response = send(
            &state,
            json_request(
                "POST",
                "/api/events",
                serde_json::json!({ "name": "Vigil", "date": "2099-01-01" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let listed: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(send(&state, get("/api/events?category=postponed")).await).await)
                .unwrap();
        assert!(listed.is_empty());

        let html = body_text(send(&state, get("/events?category=postponed")).await).await;
        assert!(html.contains("Nothing found."));

        let html = body_text(send(&state, get("/events?category=all")).await).await;
        assert!(html.contains("Vigil"));
    }

    #[tokio::test]
    async fn logout_signs_out() {
        let state = signed_in();
        let response = send(&state, post_form("/logout", "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.session.current_user().is_none());

        let response = send(&state, get("/")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
