use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const LOGIN_PATH: &str = "/auth/login";
pub const JUGGLE_PATH: &str = "/juggler/juggle";
pub const VERIFY_PATH: &str = "/polisher/verify";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// One request as the mock saw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Accounts and canned replies, fixed before the server starts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    accounts: HashMap<String, String>,
    juggle_reply: Option<Value>,
    verify_reply: Value,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            juggle_reply: None,
            verify_reply: json!({
                "input": {"sequence_1": ["homopolymer run exceeds vendor limit"]}
            }),
        }
    }
}

impl MockConfig {
    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.accounts.insert(username.to_string(), password.to_string());
        self
    }

    /// Reply for the juggle resource. Without one, the request's sequence
    /// text is echoed back as `{"text": ...}`.
    pub fn with_juggle_reply(mut self, reply: Value) -> Self {
        self.juggle_reply = Some(reply);
        self
    }

    pub fn with_verify_reply(mut self, reply: Value) -> Self {
        self.verify_reply = reply;
        self
    }
}

#[derive(Debug, Default)]
struct Ledger {
    tokens: HashSet<String>,
    recorded: Vec<RecordedRequest>,
}

/// Shared state of the mock. Clones share the issued tokens and the
/// request log, so a test can keep one clone and inspect it afterwards.
#[derive(Clone, Debug)]
pub struct MockState {
    config: Arc<MockConfig>,
    ledger: Arc<RwLock<Ledger>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(RwLock::new(Ledger::default())),
        }
    }

    pub async fn recorded(&self) -> Vec<RecordedRequest> {
        self.ledger.read().await.recorded.clone()
    }

    /// Same as `recorded`, for callers outside any async runtime.
    pub fn recorded_blocking(&self) -> Vec<RecordedRequest> {
        self.ledger.blocking_read().recorded.clone()
    }

    async fn record(&self, path: &'static str, headers: &HeaderMap, body: &Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.ledger.write().await.recorded.push(RecordedRequest {
            path,
            authorization,
            body: body.clone(),
        });
    }

    async fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = headers.get("authorization").and_then(|v| v.to_str().ok()) else {
            return false;
        };
        self.ledger.read().await.tokens.contains(token)
    }
}

pub fn app() -> Router {
    app_with(MockState::new(MockConfig::default().with_account("demo", "demo")))
}

pub fn app_with(state: MockState) -> Router {
    Router::new()
        .route(LOGIN_PATH, post(login))
        .route(JUGGLE_PATH, post(juggle))
        .route(VERIFY_PATH, post(verify))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

async fn login(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let body = serde_json::to_value(&input).unwrap_or(Value::Null);
    state.record(LOGIN_PATH, &headers, &body).await;

    if input.username.is_empty() {
        warn!("login without username");
        return Err((StatusCode::BAD_REQUEST, "username is required".to_string()));
    }

    if state.config.accounts.get(&input.username) != Some(&input.password) {
        info!(username = %input.username, "login refused");
        return Ok(Json(json!({"message": "invalid username or password"})));
    }

    let token = Uuid::new_v4().to_string();
    state.ledger.write().await.tokens.insert(token.clone());
    info!(username = %input.username, "login accepted");
    Ok(Json(json!({"token": token})))
}

async fn juggle(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    state.record(JUGGLE_PATH, &headers, &body).await;
    if !state.is_authorized(&headers).await {
        return Err((StatusCode::UNAUTHORIZED, "not authenticated".to_string()));
    }

    let reply = state.config.juggle_reply.clone().unwrap_or_else(|| {
        json!({"text": body["sequenceInformation"]["text"].as_str().unwrap_or_default()})
    });
    info!("juggle served");
    Ok(Json(reply))
}

async fn verify(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    state.record(VERIFY_PATH, &headers, &body).await;
    if !state.is_authorized(&headers).await {
        return Err((StatusCode::UNAUTHORIZED, "not authenticated".to_string()));
    }
    if body.get("constraintsInformation").is_none() {
        return Err((StatusCode::BAD_REQUEST, "no vendor constraints given".to_string()));
    }

    info!("verify served");
    Ok(Json(state.config.verify_reply.clone()))
}
