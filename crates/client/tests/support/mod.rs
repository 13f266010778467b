//! In-process mock of the SmartBiz API (auth + suppliers), bound to an
//! ephemeral port.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use smartbiz_auth::{MemorySessionStore, SessionStore};
use smartbiz_client::ClientConfig;

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct MockState {
    suppliers: Mutex<BTreeMap<u64, Value>>,
    next_id: Mutex<u64>,
    accounts: Mutex<Vec<Value>>,
    /// Every Authorization header seen on supplier routes, in order.
    auth_headers: Mutex<Vec<Option<String>>>,
    /// Canned response for the next supplier request.
    fail_next: Mutex<Option<(StatusCode, String)>>,
    list_delay: Mutex<Option<Duration>>,
    create_delay: Mutex<Option<Duration>>,
}

impl MockState {
    pub fn seed(&self, name: &str, email: &str, details: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = *next;
        self.suppliers.lock().unwrap().insert(
            id,
            json!({"id": id.to_string(), "name": name, "email": email, "supplyItemDetails": details}),
        );
        id.to_string()
    }

    pub fn suppliers(&self) -> Vec<Value> {
        self.suppliers.lock().unwrap().values().cloned().collect()
    }

    pub fn accounts(&self) -> Vec<Value> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().unwrap().clone()
    }

    pub fn fail_next(&self, status: StatusCode, body: &str) {
        *self.fail_next.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn delay_lists(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_creates(&self, delay: Duration) {
        *self.create_delay.lock().unwrap() = Some(delay);
    }

    /// Record the auth header, then apply canned failures and the bearer check.
    fn gate(&self, headers: &HeaderMap) -> Result<(), Response> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.auth_headers.lock().unwrap().push(auth.clone());

        if let Some((status, body)) = self.fail_next.lock().unwrap().take() {
            return Err((status, body).into_response());
        }

        match auth.as_deref().and_then(|a| a.strip_prefix("Bearer ")) {
            Some(token) if !token.is_empty() => Ok(()),
            _ => Err(message(StatusCode::UNAUTHORIZED, "Unauthorized")),
        }
    }
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "message": msg }))).into_response()
}

fn has_required_fields(body: &Value) -> bool {
    ["name", "email", "supplyItemDetails"]
        .iter()
        .all(|k| body.get(k).and_then(Value::as_str).is_some_and(|s| !s.is_empty()))
}

async fn login(Path(role): Path<String>, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return message(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    (StatusCode::OK, Json(json!({ "token": format!("token-{role}") }))).into_response()
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let mut accounts = state.accounts.lock().unwrap();
    if accounts.iter().any(|a| a["email"] == body["email"]) {
        return message(StatusCode::CONFLICT, "Email already registered");
    }
    accounts.push(body);
    (StatusCode::CREATED, Json(json!({ "message": "User registered" }))).into_response()
}

async fn list_suppliers(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = state.gate(&headers) {
        return resp;
    }
    let delay = *state.list_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    (StatusCode::OK, Json(Value::Array(state.suppliers()))).into_response()
}

async fn create_supplier(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = state.gate(&headers) {
        return resp;
    }
    let delay = *state.create_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if !has_required_fields(&body) || body.get("id").is_some() {
        return message(StatusCode::BAD_REQUEST, "Invalid supplier payload");
    }
    let taken = state
        .suppliers
        .lock()
        .unwrap()
        .values()
        .any(|s| s["email"] == body["email"]);
    if taken {
        return message(StatusCode::BAD_REQUEST, "email already used");
    }

    let id = state.seed(
        body["name"].as_str().unwrap_or_default(),
        body["email"].as_str().unwrap_or_default(),
        body["supplyItemDetails"].as_str().unwrap_or_default(),
    );
    let created = state.suppliers.lock().unwrap()[&id.parse::<u64>().unwrap()].clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_supplier(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = state.gate(&headers) {
        return resp;
    }
    if !has_required_fields(&body) {
        return message(StatusCode::BAD_REQUEST, "Invalid supplier payload");
    }
    let Ok(key) = id.parse::<u64>() else {
        return message(StatusCode::NOT_FOUND, "Supplier not found");
    };

    let mut suppliers = state.suppliers.lock().unwrap();
    let Some(existing) = suppliers.get_mut(&key) else {
        return message(StatusCode::NOT_FOUND, "Supplier not found");
    };
    *existing = json!({
        "id": id,
        "name": body["name"],
        "email": body["email"],
        "supplyItemDetails": body["supplyItemDetails"],
    });
    (StatusCode::OK, Json(existing.clone())).into_response()
}

async fn delete_supplier(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = state.gate(&headers) {
        return resp;
    }
    let removed = id
        .parse::<u64>()
        .ok()
        .and_then(|key| state.suppliers.lock().unwrap().remove(&key));
    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        // Deliberately bodiless so clients exercise their fallback message.
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct TestServer {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/auth/login/:role", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/suppliers", get(list_suppliers).post(create_supplier))
            .route("/api/suppliers/:id", put(update_supplier).delete(delete_supplier))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A session store already holding an owner session.
pub fn owner_store() -> Arc<dyn SessionStore> {
    let store = MemorySessionStore::with_session(smartbiz_auth::Session::new(
        smartbiz_auth::AuthToken::new("owner-token"),
        smartbiz_auth::Role::Owner,
    ));
    Arc::new(store)
}

/// Base URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
