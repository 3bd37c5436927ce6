#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use formbuilder::{config::AppConfig, router, AppState};

pub const TOKEN: &str = "test-admin-token";

/// What the fake PocketBase answers with
#[derive(Clone)]
pub struct StubOptions {
    pub schema: Value,
    pub schema_status: StatusCode,
    pub create_status: StatusCode,
    pub create_body: Value,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            schema: json!({
                "id": "pbc_3142635823",
                "name": "radiospec",
                "type": "base",
                "fields": [
                    {"name": "id", "type": "text", "system": true},
                    {"name": "name", "type": "text"},
                    {"name": "email", "type": "email"},
                    {"name": "age", "type": "number"},
                    {"name": "subscribe", "type": "bool"},
                    {"name": "created", "type": "autodate"},
                    {"name": "updated", "type": "autodate"}
                ]
            }),
            schema_status: StatusCode::OK,
            create_status: StatusCode::OK,
            create_body: json!({"id": "r8ko2jx1l3v9qpa", "collectionName": "radiospec"}),
        }
    }
}

/// Requests the fake PocketBase has seen
#[derive(Default)]
pub struct Seen {
    pub schema_auth: Mutex<Vec<Option<String>>>,
    pub create_auth: Mutex<Vec<Option<String>>>,
    pub created: Mutex<Vec<Value>>,
}

pub struct StubBackend {
    pub base_url: String,
    pub seen: Arc<Seen>,
}

#[derive(Clone)]
struct StubState {
    options: StubOptions,
    seen: Arc<Seen>,
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn stub_schema(State(stub): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    stub.seen.schema_auth.lock().unwrap().push(auth_header(&headers));
    (stub.options.schema_status, Json(stub.options.schema.clone()))
}

async fn stub_create(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(record): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.seen.create_auth.lock().unwrap().push(auth_header(&headers));
    stub.seen.created.lock().unwrap().push(record);
    (stub.options.create_status, Json(stub.options.create_body.clone()))
}

async fn serve(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

impl StubBackend {
    pub async fn spawn(options: StubOptions) -> Result<Self> {
        let seen = Arc::new(Seen::default());
        let app = Router::new()
            .route("/api/collections/:collection", get(stub_schema))
            .route("/api/collections/:collection/records", post(stub_create))
            .with_state(StubState { options, seen: seen.clone() });

        Ok(Self { base_url: serve(app).await?, seen })
    }

    pub fn created(&self) -> Vec<Value> {
        self.seen.created.lock().unwrap().clone()
    }
}

/// Base URL with nothing listening behind it
pub fn refused_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

/// Start formbuilder against `backend_url`; `env` entries override the defaults.
pub async fn spawn_app(backend_url: &str, env: &[(&str, &str)]) -> Result<String> {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("PB_URL".to_string(), backend_url.to_string()),
        ("PB_TOKEN".to_string(), TOKEN.to_string()),
        ("PB_TIMEOUT_SECS".to_string(), "3".to_string()),
    ]);
    for (key, value) in env {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = AppConfig::from_lookup(|key| vars.get(key).cloned());
    let state = AppState::new(config).context("failed to build app state")?;
    serve(router(state)).await
}
