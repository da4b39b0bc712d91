use axum::{
    Router,
    extract::{Json, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, patch},
};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::roster::{
    FormErrors, InvestorForm, InvestorPatch, MemoryStore, Participation, RecordStore,
    StoreError, participation,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");

struct Roster {
    store: Box<dyn RecordStore + Send>,
    locked: bool,
}

/// Shared handler state. Edits are refused while the roster is locked,
/// which is how it starts.
#[derive(Clone)]
pub struct AppState {
    roster: Arc<Mutex<Roster>>,
}

impl AppState {
    pub fn new(store: impl RecordStore + Send + 'static) -> Self {
        Self {
            roster: Arc::new(Mutex::new(Roster {
                store: Box::new(store),
                locked: true,
            })),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FormErrors>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LockResponse {
    locked: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(
            "/api/investors",
            get(list_investors_handler).post(create_investor_handler),
        )
        .route(
            "/api/investors/:id",
            patch(update_investor_handler).delete(delete_investor_handler),
        )
        .route("/api/participation", get(participation_handler))
        .route("/api/lock", get(lock_get_handler).post(lock_toggle_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(bind: IpAddr, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::new(bind, port);
    let app = router(AppState::default());

    let listener = TcpListener::bind(addr).await?;
    log::info!("roster HTTP API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn list_investors_handler(State(state): State<AppState>) -> Response {
    let roster = state.roster.lock().await;
    json_response(StatusCode::OK, roster.store.list())
}

async fn participation_handler(State(state): State<AppState>) -> Response {
    let roster = state.roster.lock().await;
    let summary: Participation = participation(&roster.store.list());
    json_response(StatusCode::OK, summary)
}

async fn create_investor_handler(
    State(state): State<AppState>,
    Json(form): Json<InvestorForm>,
) -> Response {
    let mut roster = state.roster.lock().await;
    if roster.locked {
        return locked_response();
    }
    match roster.store.insert(form) {
        Ok(record) => {
            log::info!("created investor {} (code {})", record.id, record.code);
            json_response(StatusCode::CREATED, record)
        }
        Err(err) => store_error_response(err),
    }
}

async fn update_investor_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<InvestorPatch>,
) -> Response {
    let mut roster = state.roster.lock().await;
    if roster.locked {
        return locked_response();
    }
    match roster.store.update(id, patch) {
        Ok(record) => {
            log::info!("updated investor {id}");
            json_response(StatusCode::OK, record)
        }
        Err(err) => store_error_response(err),
    }
}

async fn delete_investor_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut roster = state.roster.lock().await;
    if roster.locked {
        return locked_response();
    }
    match roster.store.delete(id) {
        Ok(()) => {
            log::info!("deleted investor {id}");
            with_cache_control(StatusCode::NO_CONTENT)
        }
        Err(err) => store_error_response(err),
    }
}

async fn lock_get_handler(State(state): State<AppState>) -> Response {
    let roster = state.roster.lock().await;
    json_response(
        StatusCode::OK,
        LockResponse {
            locked: roster.locked,
        },
    )
}

async fn lock_toggle_handler(State(state): State<AppState>) -> Response {
    let mut roster = state.roster.lock().await;
    roster.locked = !roster.locked;
    log::info!(
        "roster editing {}",
        if roster.locked { "locked" } else { "unlocked" }
    );
    json_response(
        StatusCode::OK,
        LockResponse {
            locked: roster.locked,
        },
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            fields: None,
        },
    )
}

fn locked_response() -> Response {
    log::warn!("rejected roster edit while locked");
    error_response(StatusCode::LOCKED, "Roster is locked; unlock editing first")
}

fn store_error_response(err: StoreError) -> Response {
    let message = err.to_string();
    log::warn!("roster store error: {message}");
    match err {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, &message),
        StoreError::Invalid(fields) => json_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Invalid investor form".to_string(),
                fields: Some(fields),
            },
        ),
    }
}
