/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use connector::RequestConfig;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub const PASSWORD: &str = "secret";

const COLLECTIONS: [&str; 6] = [
    "colleges",
    "departments",
    "programmes",
    "courses",
    "staffs",
    "tasks",
];

/// In-memory stand-in for the REST backend. Counts every request by
/// `"METHOD /path"` and fails the ones listed in `failing`.
pub struct Backend {
    records: Mutex<HashMap<String, Vec<Value>>>,
    hits: Mutex<HashMap<String, usize>>,
    failing: Mutex<HashSet<String>>,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
    delays: Mutex<HashMap<String, Duration>>,
    next_id: AtomicI64,
}

pub type SharedBackend = Arc<Backend>;

impl Backend {
    fn new(records: HashMap<String, Vec<Value>>) -> Self {
        Self {
            records: Mutex::new(records),
            hits: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            uploads: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(100),
        }
    }

    /// Hits of one route, e.g. `"GET /courses"` or `"DELETE /departments/7"`.
    pub fn hits(&self, key: &str) -> usize {
        self.hits.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// Hits whose key starts with `prefix`, e.g. `"POST "`.
    pub fn hits_starting_with(&self, prefix: &str) -> usize {
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub fn recover(&self, key: &str) {
        self.failing.lock().unwrap().remove(key);
    }

    /// Holds back the answer to one route, e.g. `"POST /courses"`.
    pub fn delay(&self, key: &str, duration: Duration) {
        self.delays.lock().unwrap().insert(key.to_string(), duration);
    }

    async fn stall(&self, key: &str) {
        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.records
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&self, collection: &str, id: i64) -> Option<Value> {
        self.records(collection)
            .into_iter()
            .find(|record| record["id"] == json!(id))
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }

    /// Counts the request and reports whether it should fail.
    fn hit(&self, key: String) -> bool {
        let failing = self.failing.lock().unwrap().contains(&key);
        *self.hits.lock().unwrap().entry(key).or_insert(0) += 1;
        failing
    }
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response()
}

pub fn user() -> Value {
    json!({
        "id": 12,
        "username": "amina",
        "email": "amina@must.ac.tz",
        "role": "ADMIN",
        "profileImage": null,
        "name": "Amina Said"
    })
}

/// Two colleges, departments 7 and 8, one programme, one course, one staff
/// member and two tasks, one of them referencing a missing course.
pub fn fixture() -> HashMap<String, Vec<Value>> {
    HashMap::from([
        (
            "colleges".to_string(),
            vec![
                json!({
                    "id": 1,
                    "name": "College of Engineering and Technology",
                    "description": "Engineering programmes",
                    "createdAt": "2024-01-10T08:00:00",
                    "updatedAt": "2024-02-01T09:30:00"
                }),
                json!({
                    "id": 2,
                    "name": "College of Science",
                    "description": null,
                    "createdAt": "2024-01-11T08:00:00",
                    "updatedAt": null
                }),
            ],
        ),
        (
            "departments".to_string(),
            vec![
                json!({"id": 7, "name": "Computer Science", "collegeId": 1, "description": "CS"}),
                json!({"id": 8, "name": "Mathematics", "collegeId": 2, "description": ""}),
            ],
        ),
        (
            "programmes".to_string(),
            vec![json!({
                "id": 3,
                "name": "BSc Computer Science",
                "code": "BCS",
                "departmentId": 7,
                "description": "Undergraduate"
            })],
        ),
        (
            "courses".to_string(),
            vec![json!({
                "id": 5,
                "name": "Data Structures",
                "code": "CS102",
                "programmeId": 3,
                "description": "Lists and trees"
            })],
        ),
        (
            "staffs".to_string(),
            vec![json!({
                "id": 9,
                "name": "Neema Mushi",
                "email": "neema@must.ac.tz",
                "phone": "+255700000009",
                "address": "Mbeya",
                "departmentId": 7
            })],
        ),
        (
            "tasks".to_string(),
            vec![
                json!({
                    "id": 11,
                    "title": "Mark exams",
                    "description": "Semester 1",
                    "dueDate": "2025-06-30",
                    "courseId": 5,
                    "departmentId": 7,
                    "staffId": 9,
                    "programmeId": 3,
                    "completed": true
                }),
                json!({
                    "id": 12,
                    "title": "Review syllabus",
                    "description": "",
                    "dueDate": "2025-07-15",
                    "courseId": 404,
                    "departmentId": 8,
                    "staffId": 9,
                    "programmeId": 3,
                    "completed": false
                }),
            ],
        ),
    ])
}

async fn list(State(state): State<SharedBackend>, name: &'static str) -> Response {
    if state.hit(format!("GET /{}", name)) {
        return failure();
    }

    match state.records.lock().unwrap().get(name) {
        Some(records) => Json(records.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(state): State<SharedBackend>,
    name: &'static str,
    Json(mut body): Json<Value>,
) -> Response {
    let key = format!("POST /{}", name);
    if state.hit(key.clone()) {
        return failure();
    }
    state.stall(&key).await;

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);

    match state.records.lock().unwrap().get_mut(name) {
        Some(records) => {
            records.push(body.clone());
            (StatusCode::CREATED, Json(body)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_one(
    State(state): State<SharedBackend>,
    name: &'static str,
    Path(id): Path<i64>,
) -> Response {
    if state.hit(format!("GET /{}/{}", name, id)) {
        return failure();
    }

    match state.record(name, id) {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(
    State(state): State<SharedBackend>,
    name: &'static str,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    let key = format!("PUT /{}/{}", name, id);
    if state.hit(key.clone()) {
        return failure();
    }
    state.stall(&key).await;

    body["id"] = json!(id);

    let mut records = state.records.lock().unwrap();
    let Some(record) = records
        .get_mut(name)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == json!(id)))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    *record = body.clone();
    Json(body).into_response()
}

async fn remove(
    State(state): State<SharedBackend>,
    name: &'static str,
    Path(id): Path<i64>,
) -> Response {
    if state.hit(format!("DELETE /{}/{}", name, id)) {
        return failure();
    }

    let mut records = state.records.lock().unwrap();
    let Some(records) = records.get_mut(name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let before = records.len();
    records.retain(|r| r["id"] != json!(id));

    if records.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn stats(State(state): State<SharedBackend>) -> Response {
    if state.hit("GET /dashboard/stats".to_string()) {
        return failure();
    }

    let count = |name: &str| state.records(name).len();
    Json(json!({
        "colleges": count("colleges"),
        "departments": count("departments"),
        "programmes": count("programmes"),
        "courses": count("courses"),
        "staff": count("staffs"),
        "tasks": count("tasks"),
    }))
    .into_response()
}

async fn completion(State(state): State<SharedBackend>) -> Response {
    if state.hit("GET /tasks/completion".to_string()) {
        return failure();
    }

    let tasks = state.records("tasks");
    let completed = tasks.iter().filter(|t| t["completed"] == json!(true)).count();

    Json(json!([
        {"name": "Completed", "value": completed},
        {"name": "Pending", "value": tasks.len() - completed},
    ]))
    .into_response()
}

async fn login(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    if state.hit("POST /auth/login".to_string()) {
        return failure();
    }

    if body["username"] == json!("amina") && body["password"] == json!(PASSWORD) {
        Json(user()).into_response()
    } else if body["username"] == json!("guest") && body["password"] == json!(PASSWORD) {
        Json(json!({"message": "Login successful"})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
    }
}

/// Answers without a body, like backends that only acknowledge.
async fn register(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    if state.hit("POST /auth/register".to_string()) {
        return failure();
    }

    if body["username"] == json!("taken") {
        (StatusCode::CONFLICT, "username taken").into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

fn matches(state: &Backend, term: &str) -> Vec<Value> {
    let term = term.to_lowercase();
    let mut found = Vec::new();

    for collection in COLLECTIONS {
        for record in state.records(collection) {
            let name = record["name"]
                .as_str()
                .or_else(|| record["title"].as_str())
                .unwrap_or_default()
                .to_string();

            if name.to_lowercase().contains(&term) {
                found.push(json!({"id": record["id"], "name": name}));
            }
        }
    }

    found
}

async fn search(
    State(state): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let term = params.get("query").cloned().unwrap_or_default();
    if state.hit(format!("GET /search?query={}", term)) {
        return failure();
    }

    Json(matches(&state, &term)).into_response()
}

async fn items(
    State(state): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let term = params.get("search").cloned().unwrap_or_default();
    if state.hit(format!("GET /items?search={}", term)) {
        return failure();
    }

    Json(matches(&state, &term)).into_response()
}

async fn current_user(State(state): State<SharedBackend>) -> Response {
    if state.hit("GET /user".to_string()) {
        return failure();
    }

    Json(user()).into_response()
}

async fn upload_profile(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    if state.hit(format!("POST /users/{}/upload-profile", id)) {
        return failure();
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let Ok(bytes) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        state.uploads.lock().unwrap().push((file_name.clone(), bytes.to_vec()));

        let mut user = user();
        user["id"] = json!(id);
        user["profileImage"] = json!(format!("/uploads/{}", file_name));
        return Json(user).into_response();
    }

    (StatusCode::BAD_REQUEST, "missing file").into_response()
}

pub fn router(state: SharedBackend) -> Router {
    let mut router = Router::new();

    for name in COLLECTIONS {
        router = router
            .route(
                &format!("/api/{}", name),
                get(move |s: State<SharedBackend>| list(s, name))
                    .post(move |s: State<SharedBackend>, b: Json<Value>| create(s, name, b)),
            )
            .route(
                &format!("/api/{}/{{id}}", name),
                get(move |s: State<SharedBackend>, p: Path<i64>| get_one(s, name, p))
                    .put(move |s: State<SharedBackend>, p: Path<i64>, b: Json<Value>| {
                        update(s, name, p, b)
                    })
                    .delete(move |s: State<SharedBackend>, p: Path<i64>| remove(s, name, p)),
            );
    }

    router
        .route("/api/dashboard/stats", get(stats))
        .route("/api/tasks/completion", get(completion))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/search", get(search))
        .route("/api/items", get(items))
        .route("/api/user", get(current_user))
        .route("/api/users/{id}/upload-profile", post(upload_profile))
        .with_state(state)
}

/// Serves `records` on an ephemeral port and returns a client for it.
pub async fn spawn_backend_with(
    records: HashMap<String, Vec<Value>>,
) -> (RequestConfig, SharedBackend) {
    let state = Arc::new(Backend::new(records));
    let app = router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (RequestConfig::new(format!("http://{}/api", addr)), state)
}

pub async fn spawn_backend() -> (RequestConfig, SharedBackend) {
    spawn_backend_with(fixture()).await
}

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tadmust-{}-{}", name, uuid::Uuid::new_v4()))
}
