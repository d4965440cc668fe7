use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api::{self, routes::Application};
use crate::core::config::Settings;

const TEST_VARS: &[&str] = &[
    "APP_HOST",
    "APP_PORT",
    "APP_ENV",
    "ENVIRONMENT",
    "APP_LOG_LEVEL",
    "APP_LOG_JSON",
    "PROMETHEUS_ENABLED",
    "BACKEND_CORS_ORIGINS",
    "OPENAPI_ENABLED",
    "OPENAPI_URL",
];

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

/// Clears every variable `Settings::load` reads and pins the test environment.
pub(crate) fn set_test_env() {
    for key in TEST_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("APP_ENV", "test");
}

/// Loads settings with `overrides` applied; the environment is reset afterwards.
pub(crate) async fn load_settings(overrides: &[(&str, &str)]) -> Settings {
    let _guard = env_lock().await;
    set_test_env();
    for (key, value) in overrides {
        std::env::set_var(key, value);
    }

    let settings = Settings::load().expect("settings");
    set_test_env();
    settings
}

pub(crate) async fn app_router(app: Application) -> Router {
    api::router::router(app, load_settings(&[]).await)
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
