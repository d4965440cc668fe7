use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::api::errors::ApiError;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::schemas::openapi::OpenApiDocument;
use crate::schemas::HealthResponse;

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { service: state.metadata().title.clone(), status: "healthy" })
}

pub(crate) async fn openapi(State(state): State<AppState>) -> Json<OpenApiDocument> {
    Json(state.openapi().clone())
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Known path, unsupported method.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Unknown route: redirect when only the trailing slash differs, 404 otherwise.
pub(crate) async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    if let Some(target) = toggle_trailing_slash(uri.path()) {
        if state.matches_route(&target) {
            let location = match uri.query() {
                Some(query) => format!("{target}?{query}"),
                None => target,
            };
            tracing::debug!(from = %uri, to = %location, "Redirecting to canonical path");
            return Redirect::temporary(&location).into_response();
        }
    }

    ApiError::NotFound("Not Found".to_string()).into_response()
}

fn toggle_trailing_slash(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }
    match path.strip_suffix('/') {
        Some(trimmed) => Some(trimmed.to_string()),
        None => Some(format!("{path}/")),
    }
}
