#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jubuddy::{ApiClient, Config, constants::*};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TEST_USER_ID: i64 = 7;
pub const TEST_USERNAME: &str = "ana";
pub const TEST_PASSWORD: &str = "secret";

/// Records held by the fake backend. Tests seed it and inspect it afterwards.
#[derive(Debug, Default)]
pub struct FakeData {
    pub transactions: Vec<Value>,
    pub goals: Vec<Value>,
    pub jar_items: Vec<Value>,
    pub invitations: Vec<Value>,
    pub users: Vec<Value>,
    pub accounts: Vec<Value>,
    pub active_account: Option<i64>,
    /// Every POST body received, keyed by path.
    pub posted: Vec<(String, Value)>,
    /// Every query string received by GET handlers.
    pub queries: Vec<HashMap<String, String>>,
}

type Shared = Arc<Mutex<FakeData>>;

pub struct TestApp {
    pub base_url: String,
    pub config: Config,
    pub client: ApiClient,
    pub data: Shared,
}

impl TestApp {
    pub fn posted_to(&self, path: &str) -> Vec<Value> {
        self.data
            .lock()
            .expect("lock fake data")
            .posted
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

fn test_config(base_url: &str) -> Config {
    Config {
        api_base: base_url.to_string(),
        storage_prefix: "jubuddy-test".to_string(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let data: Shared = Arc::new(Mutex::new(FakeData::default()));

    let router = Router::new()
        .route(LOGIN_PATH, post(login))
        .route(TRANSACTIONS_PATH, get(list_transactions))
        .route(GOALS_PATH, get(list_goals))
        .route(GOAL_FUNDS_PATH, post(update_funds))
        .route(GOAL_STATUS_PATH, post(update_status))
        .route(JAR_PATH, get(list_jar))
        .route(PURCHASE_JAR_ITEM_PATH, post(purchase_item))
        .route(DELETE_JAR_ITEM_PATH, post(delete_item))
        .route(INVITATIONS_PATH, get(list_invitations))
        .route(ACCEPT_INVITATION_PATH, post(accept_invitation))
        .route(SEARCH_USERS_PATH, get(search_users))
        .route(ACCOUNTS_PATH, get(list_accounts))
        .route(ACTIVE_ACCOUNT_PATH, get(active_account))
        .route(DELETE_ACCOUNT_PATH, post(delete_account))
        .with_state(data.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let base_url = format!("http://{}", addr);
    let config = test_config(&base_url);
    Ok(TestApp {
        client: ApiClient::new(config.clone()),
        base_url,
        config,
        data,
    })
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_client() -> anyhow::Result<ApiClient> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(ApiClient::new(test_config(&format!("http://{}", addr))))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn transaction(id: i64, date: &str, amount: f64, kind: &str, category: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "type": kind,
        "date": date,
        "category": category,
        "description": "",
    })
}

pub fn goal(id: i64, name: &str, actual: f64, target: f64, target_date: &str, status: &str) -> Value {
    json!({
        "goalID": id,
        "name": name,
        "description": "",
        "targetValue": target,
        "actualValue": actual,
        "targetDate": target_date,
        "status": status,
        "progress_percentage": ((actual / target) * 100.0).round() as u32,
    })
}

pub fn jar_item(id: i64, name: &str, cost: f64, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "cost": cost,
        "status": status,
        "date_added": "2024-03-01",
        "hold_until": "2024-03-31",
        "is_expired": false,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn record_post(data: &Shared, path: &str, body: &Value) {
    data.lock()
        .expect("lock fake data")
        .posted
        .push((path.to_string(), body.clone()));
}

fn record_query(data: &Shared, query: HashMap<String, String>) {
    data.lock().expect("lock fake data").queries.push(query);
}

async fn login(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, LOGIN_PATH, &body);
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("crash"), _) => (StatusCode::INTERNAL_SERVER_ERROR, "<h1>Server Error</h1>").into_response(),
        (Some(TEST_USERNAME), Some(TEST_PASSWORD)) => Json(json!({
            "user": {
                "id": TEST_USER_ID,
                "username": TEST_USERNAME,
                "email": "ana@example.com",
            }
        }))
        .into_response(),
        _ => error(StatusCode::UNAUTHORIZED, "Invalid username or password"),
    }
}

async fn list_transactions(
    State(data): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record_query(&data, query);
    let transactions = data.lock().expect("lock fake data").transactions.clone();
    Json(json!({ "transactions": transactions })).into_response()
}

async fn list_goals(
    State(data): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("user_id").map(String::as_str) != Some("7") {
        return error(StatusCode::BAD_REQUEST, "Missing user_id");
    }
    record_query(&data, query);
    // Progress is derived on every read; mutation replies echo the stored row.
    let goals: Vec<Value> = data
        .lock()
        .expect("lock fake data")
        .goals
        .iter()
        .map(|g| {
            let mut g = g.clone();
            let actual = g["actualValue"].as_f64().unwrap_or(0.0);
            let target = g["targetValue"].as_f64().unwrap_or(1.0);
            g["progress_percentage"] = json!(((actual / target) * 100.0).round() as u32);
            g
        })
        .collect();
    Json(json!({ "goals": goals })).into_response()
}

async fn update_funds(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, GOAL_FUNDS_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    let Some(goal) = data
        .goals
        .iter_mut()
        .find(|g| g["goalID"] == body["goal_id"])
    else {
        return error(StatusCode::NOT_FOUND, "Goal not found");
    };
    goal["actualValue"] = body["actualValue"].clone();
    Json(goal.clone()).into_response()
}

async fn update_status(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, GOAL_STATUS_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    let Some(goal) = data
        .goals
        .iter_mut()
        .find(|g| g["goalID"] == body["goal_id"])
    else {
        return error(StatusCode::NOT_FOUND, "Goal not found");
    };
    if goal["status"] == "completed" || goal["status"] == "cancelled" {
        return error(StatusCode::BAD_REQUEST, "Goal is already closed");
    }
    goal["status"] = body["status"].clone();
    Json(goal.clone()).into_response()
}

async fn list_jar(State(data): State<Shared>) -> Response {
    let items = data.lock().expect("lock fake data").jar_items.clone();
    Json(json!({ "items": items })).into_response()
}

async fn purchase_item(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, PURCHASE_JAR_ITEM_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    let Some(item) = data.jar_items.iter_mut().find(|i| i["id"] == body["item_id"]) else {
        return error(StatusCode::NOT_FOUND, "Item not found");
    };
    if item["status"] != "on_hold" {
        return error(StatusCode::BAD_REQUEST, "Item is not on hold");
    }
    item["status"] = json!("purchased");
    Json(item.clone()).into_response()
}

async fn delete_item(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, DELETE_JAR_ITEM_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    let before = data.jar_items.len();
    data.jar_items.retain(|i| i["id"] != body["item_id"]);
    if data.jar_items.len() == before {
        return error(StatusCode::NOT_FOUND, "Item not found");
    }
    // Deletions answer with an empty body.
    StatusCode::OK.into_response()
}

async fn list_invitations(State(data): State<Shared>) -> Response {
    let invitations = data.lock().expect("lock fake data").invitations.clone();
    Json(json!({ "invitations": invitations })).into_response()
}

async fn accept_invitation(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, ACCEPT_INVITATION_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    data.invitations.retain(|i| i["requestId"] != body["request_id"]);
    Json(json!({ "message": "Invitation accepted" })).into_response()
}

async fn search_users(
    State(data): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let term = query.get("q").cloned().unwrap_or_default().to_lowercase();
    record_query(&data, query);
    let users: Vec<Value> = data
        .lock()
        .expect("lock fake data")
        .users
        .iter()
        .filter(|u| {
            u["username"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term))
        })
        .cloned()
        .collect();
    Json(json!({ "users": users })).into_response()
}

async fn list_accounts(State(data): State<Shared>) -> Response {
    let accounts = data.lock().expect("lock fake data").accounts.clone();
    Json(json!({ "accounts": accounts })).into_response()
}

async fn active_account(State(data): State<Shared>) -> Response {
    let active = data.lock().expect("lock fake data").active_account;
    Json(json!({ "accountID": active })).into_response()
}

async fn delete_account(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    record_post(&data, DELETE_ACCOUNT_PATH, &body);
    let mut data = data.lock().expect("lock fake data");
    data.accounts.retain(|a| a["accountID"] != body["account_id"]);
    if data.active_account == body["account_id"].as_i64() {
        data.active_account = None;
    }
    Json(json!({ "message": "Account deleted" })).into_response()
}
