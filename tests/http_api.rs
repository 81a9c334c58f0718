//! `HttpAppointmentsApi` against an in-process fake portal server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use careport_client::api::{
    AppointmentsApi, HttpAppointmentsApi, ListAppointmentsQuery, SortDir,
};
use careport_client::auth::TokenStore;
use careport_client::config::ApiConfig;
use careport_client::error::ApiError;
use careport_client::models::AppointmentStatus;

/// Query params and Authorization header seen by the fake server.
#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>,
}

impl Captured {
    fn last(&self) -> (HashMap<String, String>, Option<String>) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

/// Serve `router` on an ephemeral port from a dedicated runtime thread.
/// Returns the base URL; the thread is leaked for the test's lifetime.
fn spawn_server(router: Router) -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();
    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("test runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test listener");
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    let addr = rx.recv().expect("server address");
    format!("http://{addr}")
}

fn empty_page() -> Value {
    json!({
        "content": [],
        "pageNo": 0,
        "pageSize": 1000,
        "totalElements": 0,
        "totalPages": 0,
        "last": true
    })
}

async fn capture_handler(
    State(captured): State<Captured>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    captured.requests.lock().unwrap().push((params, auth));
    Json(empty_page())
}

fn client_for(base_url: &str, tokens: Arc<TokenStore>) -> HttpAppointmentsApi {
    let config = ApiConfig::new(base_url).with_timeout(Duration::from_secs(5));
    HttpAppointmentsApi::new(&config, tokens)
}

fn bulk_query(search_term: Option<&str>) -> ListAppointmentsQuery {
    ListAppointmentsQuery {
        page_no: 0,
        page_size: 1000,
        sort_by: "created_date".into(),
        sort_dir: SortDir::Desc,
        search_term: search_term.map(String::from),
    }
}

#[test]
fn forwards_query_params_and_bearer_token() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/api/v1/appointments", get(capture_handler))
        .with_state(captured.clone());
    let base = spawn_server(router);

    let tokens = Arc::new(TokenStore::new());
    tokens.set("tok-123");
    let api = client_for(&base, tokens);

    api.list_appointments(&bulk_query(Some("flu"))).unwrap();

    let (params, auth) = captured.last();
    assert_eq!(params.get("pageNo").map(String::as_str), Some("0"));
    assert_eq!(params.get("pageSize").map(String::as_str), Some("1000"));
    assert_eq!(params.get("sortBy").map(String::as_str), Some("created_date"));
    assert_eq!(params.get("sortDir").map(String::as_str), Some("desc"));
    assert_eq!(params.get("searchTerm").map(String::as_str), Some("flu"));
    assert_eq!(auth.as_deref(), Some("Bearer tok-123"));
}

#[test]
fn omits_search_term_and_auth_when_absent() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/api/v1/appointments", get(capture_handler))
        .with_state(captured.clone());
    let base = spawn_server(router);

    let api = client_for(&base, Arc::new(TokenStore::new()));
    api.list_appointments(&bulk_query(None)).unwrap();

    let (params, auth) = captured.last();
    assert!(!params.contains_key("searchTerm"));
    assert!(auth.is_none());
}

#[test]
fn parses_records_and_unknown_statuses() {
    async fn listing() -> Json<Value> {
        Json(json!({
            "content": [
                {
                    "id": "6f1c1563-5f75-4f39-9a84-4b87b7c92d01",
                    "status": "COMPLETED",
                    "start_time": "2026-03-01T09:00:00Z",
                    "end_time": "2026-03-01T09:30:00Z",
                    "created_date": "2026-02-20T12:00:00Z",
                    "customer": {
                        "id": "0b8ab54c-9084-4d31-b2f3-1f7f70f2a2aa",
                        "full_name": "Nguyen Van A"
                    },
                    "doctor": {
                        "id": "e3b7db85-76a5-4f9e-8c25-d9d1cb6cf3bb",
                        "full_name": "Grace Hopper"
                    }
                },
                {
                    "id": "7a2d2674-6086-4f4a-ab95-5c98c8da3e12",
                    "status": "RESCHEDULED",
                    "start_time": "2026-03-02T10:00:00Z",
                    "end_time": "2026-03-02T10:30:00Z",
                    "created_date": "2026-02-21T12:00:00Z",
                    "customer": {
                        "id": "1c9bc65d-a195-4e42-c3f4-207081f3b3bb",
                        "full_name": "Anna"
                    },
                    "doctor": {
                        "id": "f4c8ec96-87b6-4faf-9d36-eae2dc7df4cc",
                        "full_name": "Ada Lovelace"
                    }
                }
            ],
            "pageNo": 0,
            "pageSize": 1000,
            "totalElements": 2,
            "totalPages": 1,
            "last": true
        }))
    }

    let router = Router::new().route("/api/v1/appointments", get(listing));
    let base = spawn_server(router);

    let api = client_for(&base, Arc::new(TokenStore::new()));
    let page = api.list_appointments(&bulk_query(None)).unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].status, AppointmentStatus::Completed);
    assert_eq!(page.content[0].customer.full_name, "Nguyen Van A");
    assert_eq!(page.content[1].status, AppointmentStatus::Other);
    assert_eq!(page.total_elements, 2);
}

#[test]
fn non_success_status_maps_to_status_error_with_message() {
    async fn failing() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "maintenance window" })),
        )
    }

    let router = Router::new().route("/api/v1/appointments", get(failing));
    let base = spawn_server(router);

    let api = client_for(&base, Arc::new(TokenStore::new()));
    let err = api.list_appointments(&bulk_query(None)).unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("Expected Status error, got: {other}"),
    }
}

#[test]
fn malformed_body_maps_to_parse_error() {
    async fn garbage() -> &'static str {
        "this is not json"
    }

    let router = Router::new().route("/api/v1/appointments", get(garbage));
    let base = spawn_server(router);

    let api = client_for(&base, Arc::new(TokenStore::new()));
    let err = api.list_appointments(&bulk_query(None)).unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn unreachable_server_maps_to_transport_error() {
    // Nothing listens on this port.
    let api = client_for("http://127.0.0.1:9", Arc::new(TokenStore::new()));
    let err = api.list_appointments(&bulk_query(None)).unwrap_err();
    assert!(matches!(err, ApiError::Connect(_) | ApiError::Http(_)));
}
