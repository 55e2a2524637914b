//! In-process stand-in for the Roxy `/flags` API.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use roxy_scaffold::flags::UpdateFlagRequest;

// MODELS

#[derive(Debug, Clone, Serialize)]
pub struct StoredFlag {
    pub name: String,
    pub expression: String,
}

#[derive(Clone)]
pub struct FakeRoxyState {
    flags: Arc<Mutex<BTreeMap<String, String>>>,
    healthy: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

impl Default for FakeRoxyState {
    fn default() -> Self {
        Self {
            flags: Arc::default(),
            healthy: Arc::new(AtomicBool::new(true)),
            requests: Arc::default(),
        }
    }
}

// SERVERS

pub struct FakeRoxy {
    pub addr: SocketAddr,
    state: FakeRoxyState,
}

impl FakeRoxy {
    pub async fn start() -> Self {
        let state = FakeRoxyState::default();
        let app = routes(state.clone());
        let addr = serve(app).await;
        Self { addr, state }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.state.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn insert(&self, name: &str, expression: &str) {
        self.state
            .flags
            .lock()
            .unwrap()
            .insert(name.to_string(), expression.to_string());
    }

    pub fn expression(&self, name: &str) -> Option<String> {
        self.state.flags.lock().unwrap().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.flags.lock().unwrap().len()
    }
}

/// Answers every request with `200 OK` and a body that is not JSON.
pub async fn start_garbage_server() -> SocketAddr {
    let app = Router::new().fallback(|| async { "roxy is warming up" });
    serve(app).await
}

/// Answers every request with `200 OK` and an empty body.
pub async fn start_empty_body_server() -> SocketAddr {
    let app = Router::new().fallback(|| async { "" });
    serve(app).await
}

/// A port that nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

// ROUTES

fn routes(state: FakeRoxyState) -> Router {
    Router::new()
        .route("/flags/", get(list).delete(delete_all))
        .route("/flags/{name}", get(get_one).post(upsert).delete(delete_one))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

async fn count_requests(State(state): State<FakeRoxyState>, req: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

async fn list(State(state): State<FakeRoxyState>) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !state.healthy.load(Ordering::SeqCst) {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "starting".to_string()));
    }

    let flags: Vec<StoredFlag> = state
        .flags
        .lock()
        .unwrap()
        .iter()
        .map(|(name, expression)| StoredFlag {
            name: name.clone(),
            expression: expression.clone(),
        })
        .collect();

    Ok(Json(flags))
}

async fn delete_all(State(state): State<FakeRoxyState>) -> impl IntoResponse {
    let mut flags = state.flags.lock().unwrap();
    let deleted = flags.len();
    flags.clear();

    Json(json!({ "deleted": deleted }))
}

async fn get_one(
    State(state): State<FakeRoxyState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let flags = state.flags.lock().unwrap();

    match flags.get(&name) {
        Some(expression) => Ok(Json(StoredFlag {
            name,
            expression: expression.clone(),
        })),
        None => Err((StatusCode::NOT_FOUND, "Flag not found".to_string())),
    }
}

async fn upsert(
    State(state): State<FakeRoxyState>,
    Path(name): Path<String>,
    Json(payload): Json<UpdateFlagRequest>,
) -> impl IntoResponse {
    state
        .flags
        .lock()
        .unwrap()
        .insert(name.clone(), payload.expression.clone());

    (
        StatusCode::CREATED,
        Json(StoredFlag {
            name,
            expression: payload.expression,
        }),
    )
}

async fn delete_one(
    State(state): State<FakeRoxyState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.flags.lock().unwrap().remove(&name) {
        Some(_) => Ok((StatusCode::OK, Json(json!({ "deleted": true })))),
        None => Err((StatusCode::NOT_FOUND, "Flag not found".to_string())),
    }
}
