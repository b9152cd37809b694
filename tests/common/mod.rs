#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::process::{Command, Output};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// Path to the compiled officehub binary
pub fn officehub_binary() -> &'static str {
    env!("CARGO_BIN_EXE_officehub")
}

#[derive(Default)]
struct ServiceState {
    collections: HashMap<String, Vec<Value>>,
    failures: HashMap<String, (u16, String)>,
    requests: Vec<String>,
    last_authorization: Option<String>,
    next_id: u64,
}

type Shared = Arc<Mutex<ServiceState>>;

/// In-memory stand-in for the office-management REST service.
///
/// Collections live at `/{name}`, records at `/{name}/{id}`. Account
/// endpoints answer at `/{role}/register` and `/{role}/forgot-password`.
pub struct MockService {
    pub url: String,
    state: Shared,
    runtime: Option<Runtime>,
}

impl MockService {
    /// Start the service on the current tokio runtime.
    pub async fn start() -> Self {
        let state = Shared::default();
        let url = serve(state.clone()).await;
        MockService {
            url,
            state,
            runtime: None,
        }
    }

    /// Start the service on a runtime of its own, for tests that drive the
    /// binary synchronously.
    pub fn spawn() -> Self {
        let runtime = Runtime::new().expect("Failed to build tokio runtime");
        let state = Shared::default();
        let url = runtime.block_on(serve(state.clone()));
        MockService {
            url,
            state,
            runtime: Some(runtime),
        }
    }

    /// Replace the records of a collection.
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.state
            .lock()
            .collections
            .insert(collection.to_string(), records);
    }

    /// Make every request on a collection fail with the given status and
    /// `{"message": ...}` body.
    pub fn fail(&self, collection: &str, status: u16, message: &str) {
        self.state
            .lock()
            .failures
            .insert(collection.to_string(), (status, message.to_string()));
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Requests received so far, as "METHOD /path".
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().last_authorization.clone()
    }
}

async fn serve(state: Shared) -> String {
    let app = Router::new()
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            put(update_record)
                .delete(remove_record)
                .post(account_action),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{addr}")
}

fn record(state: &Shared, method: &str, path: String, headers: &HeaderMap) -> Option<Response> {
    let mut state = state.lock();
    state.requests.push(format!("{method} {path}"));
    state.last_authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let collection = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    state
        .failures
        .get(collection)
        .map(|(status, message)| error(*status, message))
}

fn error(status: u16, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "message": message }))).into_response()
}

/// Fields the service fills in on create when the payload leaves them out.
fn server_defaults(collection: &str) -> Vec<(&'static str, Value)> {
    let created = json!("2024-01-25T09:00:00Z");
    match collection {
        "tasks" => vec![("createdAt", created), ("status", json!("pending"))],
        "leaves" => vec![("appliedAt", created), ("status", json!("pending"))],
        "notifications" => vec![("createdAt", created), ("isRead", json!(false))],
        "employees" => vec![("status", json!("active"))],
        "payroll" => vec![("status", json!("pending"))],
        _ => Vec::new(),
    }
}

async fn list_records(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = record(&state, "GET", format!("/{collection}"), &headers) {
        return failure;
    }
    let records = state
        .lock()
        .collections
        .get(&collection)
        .cloned()
        .unwrap_or_default();
    Json(records).into_response()
}

async fn create_record(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    if let Some(failure) = record(&state, "POST", format!("/{collection}"), &headers) {
        return failure;
    }

    let mut state = state.lock();
    state.next_id += 1;
    let mut fields = body;
    fields.insert("id".to_string(), json!(format!("new-{}", state.next_id)));
    for (key, value) in server_defaults(&collection) {
        fields.entry(key).or_insert(value);
    }

    let created = Value::Object(fields);
    state
        .collections
        .entry(collection)
        .or_default()
        .push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_record(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    if let Some(failure) = record(&state, "PUT", format!("/{collection}/{id}"), &headers) {
        return failure;
    }

    let mut state = state.lock();
    let found = state
        .collections
        .get_mut(&collection)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == json!(id)));

    match found {
        Some(Value::Object(existing)) => {
            for (key, value) in body {
                existing.insert(key, value);
            }
            Json(Value::Object(existing.clone())).into_response()
        }
        _ => error(404, "Record not found"),
    }
}

async fn remove_record(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = record(&state, "DELETE", format!("/{collection}/{id}"), &headers) {
        return failure;
    }

    let mut state = state.lock();
    let Some(records) = state.collections.get_mut(&collection) else {
        return error(404, "Record not found");
    };
    let before = records.len();
    records.retain(|r| r["id"] != json!(id));
    if records.len() == before {
        return error(404, "Record not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn account_action(
    State(state): State<Shared>,
    Path((role, action)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = record(&state, "POST", format!("/{role}/{action}"), &headers) {
        return failure;
    }

    let email = body["email"].as_str().unwrap_or_default();
    match action.as_str() {
        "register" if email.contains('@') => {
            (StatusCode::CREATED, Json(json!({ "email": email, "role": role }))).into_response()
        }
        "register" => error(400, "Please provide a valid email"),
        "forgot-password" if email.ends_with("@example.com") => {
            Json(json!({ "message": "Reset link sent" })).into_response()
        }
        "forgot-password" => StatusCode::NOT_FOUND.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Helper to run officehub commands in an isolated temp directory against a
/// mock service.
pub struct OfficeTest {
    pub temp_dir: TempDir,
    pub service: Option<MockService>,
}

impl OfficeTest {
    /// A workspace without a service; the API URL points nowhere.
    pub fn new() -> Self {
        OfficeTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            service: None,
        }
    }

    /// A workspace whose API URL points at a fresh mock service.
    pub fn with_service() -> Self {
        OfficeTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            service: Some(MockService::spawn()),
        }
    }

    pub fn service(&self) -> &MockService {
        self.service.as_ref().expect("test has no mock service")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let api_url = match &self.service {
            Some(service) => service.url.clone(),
            // Nothing listens on port 9 of the loopback interface.
            None => "http://127.0.0.1:9".to_string(),
        };

        Command::new(officehub_binary())
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("OFFICEHUB_ROOT", self.temp_dir.path().join(".officehub"))
            .env("OFFICEHUB_API_URL", api_url)
            .env_remove("OFFICEHUB_TOKEN")
            .env_remove("OFFICEHUB_LOG")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute officehub command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run with `--json` and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run_success(&full);
        serde_json::from_str(&stdout).expect("Failed to parse JSON output")
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".officehub");
        fs::create_dir_all(&dir).expect("Failed to create .officehub directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        let path = self.temp_dir.path().join(".officehub").join("config.yaml");
        fs::read_to_string(path).expect("Failed to read config file")
    }
}

pub fn employee(id: &str, name: &str, department: &str, salary: f64, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.split(' ').next().unwrap_or(name).to_lowercase()),
        "department": department,
        "position": "Engineer",
        "salary": salary,
        "joinDate": "2023-01-15",
        "status": status,
    })
}

pub fn task(id: &str, title: &str, assigned_to: &str, priority: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} details"),
        "assignedTo": assigned_to,
        "assignedBy": "1",
        "priority": priority,
        "status": status,
        "dueDate": "2024-02-01",
        "createdAt": "2024-01-20T10:00:00Z",
    })
}

pub fn leave(id: &str, employee_id: &str, name: &str, kind: &str, status: &str) -> Value {
    json!({
        "id": id,
        "employeeId": employee_id,
        "employeeName": name,
        "type": kind,
        "startDate": "2024-01-15",
        "endDate": "2024-01-17",
        "reason": "Family trip",
        "status": status,
        "appliedAt": "2024-01-10",
    })
}
