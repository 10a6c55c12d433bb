//! In-process stand-ins for the platform's cloud, users and thumbnails APIs
#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sentinel_relay::config::{
    HttpConfig, IdentityConfig, LoggingConfig, MessagingConfig, OpenCloudConfig,
    PermissionConfig, RelayConfig, ServiceConfig,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub const API_KEY: &str = "test-api-key";
pub const API_TOKEN: &str = "0123456789abcdef0123456789abcdef";
pub const UNIVERSE_ID: &str = "4242";

/// Everything the fake platform has seen and will answer with
#[derive(Default)]
pub struct PlatformState {
    /// Stored `gameJoinRestriction` objects by user
    pub restrictions: HashMap<u64, Value>,
    /// PATCH bodies in arrival order
    pub patches: Vec<(u64, Value)>,
    pub restriction_gets: Vec<u64>,
    /// Published (topic, decoded message) pairs
    pub published: Vec<(String, Value)>,
    pub publish_attempts: usize,
    pub users: HashMap<u64, Value>,
    /// When set, every PATCH is rejected with this status and message
    pub reject_patch: Option<(u16, String)>,
    /// When set, restriction GETs answer with this status
    pub fail_get: Option<u16>,
    pub fail_publish: bool,
    pub missing_api_key: usize,
}

#[derive(Clone)]
pub struct FakePlatform {
    pub base_url: String,
    pub state: Arc<Mutex<PlatformState>>,
}

impl FakePlatform {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(PlatformState::default()));

        let app = Router::new()
            .route(
                "/cloud/v2/universes/:universe/user-restrictions/:user",
                get(get_restriction).patch(patch_restriction),
            )
            .route(
                "/messaging-service/v1/universes/:universe/topics/:topic",
                post(publish),
            )
            .route("/users-api/v1/users/:user", get(get_user))
            .route("/thumbs-api/v1/users/avatar-headshot", get(get_avatar))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn add_user(&self, id: u64, name: &str) {
        self.state.lock().unwrap().users.insert(
            id,
            json!({
                "description": "Just here to play",
                "created": "2015-06-01T10:00:00.000Z",
                "isBanned": false,
                "id": id,
                "name": name,
                "displayName": name,
            }),
        );
    }

    pub fn config(&self) -> RelayConfig {
        relay_config(&self.base_url)
    }
}

pub fn relay_config(base_url: &str) -> RelayConfig {
    RelayConfig {
        service: ServiceConfig {
            hostname: "127.0.0.1".to_string(),
            port: 0,
            api_token: API_TOKEN.to_string(),
            version: "test".to_string(),
        },
        open_cloud: OpenCloudConfig {
            api_key: API_KEY.to_string(),
            universe_id: UNIVERSE_ID.to_string(),
            base_url: base_url.to_string(),
        },
        identity: IdentityConfig {
            users_url: format!("{}/users-api", base_url),
            thumbnails_url: format!("{}/thumbs-api", base_url),
        },
        permissions: PermissionConfig::default(),
        messaging: MessagingConfig::default(),
        http: HttpConfig {
            timeout_secs: 5,
            user_agent: "sentinel-relay-tests".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            json: false,
        },
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

type Shared = State<Arc<Mutex<PlatformState>>>;

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

fn restriction_body(user: u64, restriction: &Value) -> Value {
    json!({
        "path": format!("universes/{}/user-restrictions/{}", UNIVERSE_ID, user),
        "user": format!("users/{}", user),
        "gameJoinRestriction": restriction,
    })
}

async fn patch_restriction(
    State(state): Shared,
    Path((_universe, user)): Path<(String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !has_api_key(&headers) {
        state.missing_api_key += 1;
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.patches.push((user, body.clone()));

    if let Some((status, message)) = state.reject_patch.clone() {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({ "code": "REJECTED", "message": message }))).into_response();
    }

    let incoming = body["gameJoinRestriction"].clone();
    let stored = if incoming["active"] == json!(true) {
        let mut record = incoming;
        record["startTime"] = json!("2024-05-01T12:30:00Z");
        record
    } else {
        let mut record = state
            .restrictions
            .get(&user)
            .cloned()
            .unwrap_or_else(|| json!({}));
        record["active"] = json!(false);
        record
    };
    state.restrictions.insert(user, stored.clone());

    Json(restriction_body(user, &stored)).into_response()
}

async fn get_restriction(
    State(state): Shared,
    Path((_universe, user)): Path<(String, u64)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if !has_api_key(&headers) {
        state.missing_api_key += 1;
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.restriction_gets.push(user);

    if let Some(status) = state.fail_get {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({ "code": "INTERNAL", "message": "upstream exploded" })))
            .into_response();
    }

    match state.restrictions.get(&user) {
        Some(record) => Json(restriction_body(user, record)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "NOT_FOUND", "message": "Resource not found" })),
        )
            .into_response(),
    }
}

async fn publish(
    State(state): Shared,
    Path((_universe, topic)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !has_api_key(&headers) {
        state.missing_api_key += 1;
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.publish_attempts += 1;

    if state.fail_publish {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "No subscribers" })),
        )
            .into_response();
    }

    let message: Value = serde_json::from_str(body["message"].as_str().unwrap()).unwrap();
    state.published.push((topic, message));
    StatusCode::OK.into_response()
}

async fn get_user(State(state): Shared, Path(user): Path<u64>) -> Response {
    let state = state.lock().unwrap();
    match state.users.get(&user) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "errors": [{ "code": 3, "message": "The user id is invalid." }] })),
        )
            .into_response(),
    }
}

async fn get_avatar(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let id = params.get("userIds").cloned().unwrap_or_default();
    Json(json!({
        "data": [{
            "targetId": id,
            "state": "Completed",
            "imageUrl": format!("https://tr.rbxcdn.com/{}/150/150/AvatarHeadshot/Png", id),
        }]
    }))
}
