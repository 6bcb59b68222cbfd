//! Test harness: an in-process stand-in for the Health Manthan API plus the
//! dashboard server pointed at it, both on random ports.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use health_manthan_admin::{AppState, build_router, config::Config};

pub const UPSTREAM_TOKEN: &str = "upstream-token";

#[derive(Default)]
pub struct Upstream {
    /// Every authenticated call answers 401 while set.
    pub expired: bool,
    pub failing_uploads: HashSet<String>,
    pub failing_lists: HashSet<&'static str>,
    pub create_reply: Option<(StatusCode, Value)>,
    /// Uploads answer only after this long.
    pub upload_delay: Option<Duration>,
    pub created: Vec<Value>,
    pub uploads: Vec<String>,
    pub hospitals: Vec<Value>,
    pub doctors: Vec<Value>,
}

pub type Shared = Arc<Mutex<Upstream>>;

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {UPSTREAM_TOKEN}");
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    !state.lock().unwrap().expired && presented == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "jwt expired" })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({ "success": true, "data": { "token": UPSTREAM_TOKEN } })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn upload(State(state): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let mut name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            name = field.file_name().map(str::to_string);
            let _ = field.bytes().await;
        }
    }
    let Some(name) = name else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "image field missing" })),
        )
            .into_response();
    };

    let (fail, delay) = {
        let mut s = state.lock().unwrap();
        s.uploads.push(name.clone());
        (s.failing_uploads.contains(&name), s.upload_delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "storage error" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "file": { "url": format!("http://cdn.test/{name}") } }))
        .into_response()
}

async fn lookup_list(state: Shared, headers: HeaderMap, which: &'static str) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if state.lock().unwrap().failing_lists.contains(which) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "success": false, "message": "unavailable" })),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "data": [
            { "_id": format!("{which}-1"), "name": format!("{which} one") },
            { "_id": format!("{which}-2"), "name": format!("{which} two") },
        ]
    }))
    .into_response()
}

async fn create_hospital(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut s = state.lock().unwrap();
    s.created.push(body.clone());
    match s.create_reply.clone() {
        Some((status, reply)) => (status, Json(reply)).into_response(),
        None => {
            let mut record = body;
            record["_id"] = json!(format!("h-{}", 100 + s.created.len()));
            Json(json!({
                "success": true,
                "data": record,
                "message": "Hospital added successfully"
            }))
            .into_response()
        }
    }
}

async fn list_hospitals(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let data = state.lock().unwrap().hospitals.clone();
    Json(json!({ "success": true, "data": data })).into_response()
}

async fn get_hospital(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let found = state
        .lock()
        .unwrap()
        .hospitals
        .iter()
        .find(|h| h["_id"] == id.as_str())
        .cloned();
    match found {
        Some(h) => Json(json!({ "success": true, "data": h })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Hospital not found" })),
        )
            .into_response(),
    }
}

async fn list_doctors(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let data = state.lock().unwrap().doctors.clone();
    Json(json!({ "success": true, "data": data })).into_response()
}

async fn create_doctor(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut s = state.lock().unwrap();
    let mut record = body;
    record["_id"] = json!(format!("d-{}", s.doctors.len() + 1));
    s.doctors.push(record.clone());
    Json(json!({ "success": true, "data": record, "message": "Doctor added" })).into_response()
}

fn seed_hospitals() -> Vec<Value> {
    (1..=12)
        .map(|i| {
            json!({
                "_id": format!("h-{i}"),
                "name": format!("City Care {i}"),
                "city": if i % 2 == 0 { "Indore" } else { "Bhopal" },
                "phone": "9876543210",
            })
        })
        .collect()
}

pub fn upstream_router(state: Shared) -> Router {
    Router::new()
        .route("/admin/login", post(login))
        .route("/upload-images/image", post(upload))
        .route(
            "/insurance-company/list",
            get(|State(s): State<Shared>, h: HeaderMap| lookup_list(s, h, "insurance")),
        )
        .route(
            "/cashless-insurance-company/list",
            get(|State(s): State<Shared>, h: HeaderMap| lookup_list(s, h, "cashless")),
        )
        .route(
            "/goverment-panel/list",
            get(|State(s): State<Shared>, h: HeaderMap| lookup_list(s, h, "panel")),
        )
        .route(
            "/hospital-category/list",
            get(|State(s): State<Shared>, h: HeaderMap| lookup_list(s, h, "category")),
        )
        .route("/hospital", post(create_hospital))
        .route("/hospital/list", get(list_hospitals))
        .route("/hospital/{id}", get(get_hospital))
        .route("/doctor", post(create_doctor))
        .route("/doctor/list", get(list_doctors))
        .with_state(state)
}

pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub struct Harness {
    pub upstream: Shared,
    pub base_url: String,
    pub http: reqwest::Client,
}

impl Harness {
    pub async fn start() -> Self {
        let upstream: Shared = Arc::new(Mutex::new(Upstream {
            hospitals: seed_hospitals(),
            ..Upstream::default()
        }));
        let upstream_url = spawn(upstream_router(upstream.clone())).await;

        let config = Config {
            api_base_url: upstream_url,
            ..Config::default()
        };
        let base_url = spawn(build_router(AppState::new(config))).await;

        Self {
            upstream,
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(
                self.http
                    .post(self.url("/auth/login"))
                    .json(&json!({ "username": "admin", "password": "secret" })),
            )
            .await;
        assert_eq!(status, 200, "login failed: {body}");
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    pub async fn send(&self, req: reqwest::RequestBuilder) -> (u16, Value) {
        let resp = req.send().await.unwrap();
        let status = resp.status().as_u16();
        let body = resp.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, token: &str, path: &str) -> (u16, Value) {
        self.send(self.http.get(self.url(path)).bearer_auth(token))
            .await
    }

    pub async fn post(&self, token: &str, path: &str, body: Value) -> (u16, Value) {
        self.send(self.http.post(self.url(path)).bearer_auth(token).json(&body))
            .await
    }

    pub async fn patch(&self, token: &str, path: &str, body: Value) -> (u16, Value) {
        self.send(self.http.patch(self.url(path)).bearer_auth(token).json(&body))
            .await
    }

    pub async fn put(&self, token: &str, path: &str, body: Value) -> (u16, Value) {
        self.send(self.http.put(self.url(path)).bearer_auth(token).json(&body))
            .await
    }

    pub async fn delete(&self, token: &str, path: &str) -> (u16, Value) {
        self.send(self.http.delete(self.url(path)).bearer_auth(token))
            .await
    }

    pub async fn upload(&self, token: &str, path: &str, names: &[&str]) -> (u16, Value) {
        let form = names.iter().fold(Form::new(), |form, name| {
            form.part(
                "files",
                Part::bytes(b"\x89PNG fake".to_vec())
                    .file_name(name.to_string())
                    .mime_str("image/png")
                    .unwrap(),
            )
        });
        self.send(self.http.post(self.url(path)).bearer_auth(token).multipart(form))
            .await
    }

    /// Fills every required step-1 field and uploads an icon.
    pub async fn complete_step1(&self, token: &str) {
        let (status, _) = self
            .patch(
                token,
                "/wizard/fields",
                json!({
                    "name": "Sunrise Multispeciality",
                    "category": "category-1",
                    "phone": "9876543210",
                    "whatsapp": "9123456780",
                    "email": "desk@sunrise.in",
                    "city": "Indore",
                    "location": "AB Road, Vijay Nagar",
                }),
            )
            .await;
        assert_eq!(status, 200);

        let (status, body) = self.upload(token, "/wizard/icon", &["icon.png"]).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["draft"]["iconUrl"], "http://cdn.test/icon.png");
    }
}
