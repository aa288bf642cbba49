//! In-process mock of the college backend.
//!
//! Every request is recorded. Responses come from scripted entries first
//! (per method + path, the last one repeating) and then from simple
//! in-memory collections that support list/create/read/update/delete.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use campus_client::config::ConsoleConfig;
use campus_client::Console;

pub const TEST_TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    requests: Vec<Recorded>,
    scripted: HashMap<(Method, String), VecDeque<(StatusCode, Value)>>,
    collections: HashMap<String, Vec<Value>>,
}

type Shared = Arc<Mutex<MockState>>;

#[derive(Clone)]
pub struct MockBackend {
    state: Shared,
    pub url: String,
}

impl MockBackend {
    /// Bind to an ephemeral port and serve in the background.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            state,
            url: format!("http://{addr}"),
        }
    }

    /// Queue a response for `method path`. The last queued response keeps
    /// answering once the others are used up.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .lock()
            .unwrap()
            .scripted
            .entry((method, path.to_string()))
            .or_default()
            .push_back((status, body));
    }

    /// Serve `path` as a CRUD collection seeded with `rows`.
    pub fn collection(&self, path: &str, rows: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .collections
            .insert(path.to_string(), rows);
    }

    pub fn rows(&self, path: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn console(&self) -> Console {
        Console::new(ConsoleConfig::new(&self.url)).unwrap()
    }

    /// A console whose session already holds [`TEST_TOKEN`].
    pub async fn signed_in(&self) -> Console {
        let console = self.console();
        console.session.set_token(TEST_TOKEN).await.unwrap();
        console
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        bearer,
        body: body.clone(),
    });

    if let Some(queue) = state.scripted.get_mut(&(method.clone(), path.clone())) {
        let (status, reply) = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        return (status, Json(reply)).into_response();
    }

    serve_collection(&mut state.collections, &method, &path, body)
        .unwrap_or_else(|| not_found("Route"))
}

fn serve_collection(
    collections: &mut HashMap<String, Vec<Value>>,
    method: &Method,
    path: &str,
    body: Value,
) -> Option<Response> {
    if let Some(rows) = collections.get_mut(path) {
        return match *method {
            Method::GET => Some(ok(Value::Array(rows.clone()))),
            Method::POST => {
                let id = rows
                    .iter()
                    .filter_map(|r| r["id"].as_i64())
                    .max()
                    .unwrap_or(0)
                    + 1;
                let mut row = body;
                row["id"] = json!(id);
                rows.push(row.clone());
                Some((StatusCode::CREATED, Json(json!({ "payload": row }))).into_response())
            }
            _ => None,
        };
    }

    let (base, id) = path.rsplit_once('/')?;
    let id: i64 = id.parse().ok()?;
    let rows = collections.get_mut(base)?;
    let index = rows.iter().position(|r| r["id"].as_i64() == Some(id));

    let response = match (method.clone(), index) {
        (_, None) => not_found("Record"),
        (Method::GET, Some(i)) => ok(rows[i].clone()),
        (Method::PUT, Some(i)) => {
            if let (Some(target), Value::Object(changes)) = (rows[i].as_object_mut(), body) {
                target.extend(changes);
            }
            ok(rows[i].clone())
        }
        (Method::DELETE, Some(i)) => {
            rows.remove(i);
            ok(Value::Null)
        }
        _ => return None,
    };
    Some(response)
}

fn ok(payload: Value) -> Response {
    (StatusCode::OK, Json(json!({ "payload": payload }))).into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} not found") })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn student_json(id: i64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "registration_number": 2021000 + id,
        "first_name": first,
        "last_name": last,
        "father_name": "R. Sharma",
        "mother_name": "S. Sharma",
        "category": "GEN",
        "phone": 9800000000_i64 + id,
        "email": format!("student{id}@college.edu"),
        "branch_id": 1,
        "batch_id": 7,
        "semester_id": 1
    })
}

pub fn semester_json(id: i64, subjects: &[i64]) -> Value {
    json!({
        "id": id,
        "title": format!("Semester {id}"),
        "start_date": null,
        "end_date": null,
        "batch_id": 7,
        "subjects": subjects
            .iter()
            .map(|s| json!({"id": s, "title": format!("Subject {s}")}))
            .collect::<Vec<_>>()
    })
}
