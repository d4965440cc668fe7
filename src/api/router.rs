use axum::{
    http::header::{HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN},
    http::{HeaderName, Method, Request, Response},
    routing::{get, MethodRouter},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::api::handlers;
use crate::api::openapi;
use crate::api::routes::{Application, HttpMethod};
use crate::core::{config::Settings, metrics, state::AppState};

/// Builds the served router: the application's dispatch table plus the framework
/// routes (`/healthz`, OpenAPI, `/metrics`), the fallback and the HTTP layers.
pub(crate) fn router(app: Application, settings: Settings) -> Router {
    let cors = build_cors_layer(&settings);
    let document = openapi::document(&app);
    let route_patterns = app.route_patterns();

    let mut builtins: Vec<(String, MethodRouter<AppState>)> =
        vec![("/healthz".to_string(), get(handlers::healthz).head(handlers::healthz))];
    if settings.openapi().enabled {
        builtins.push((settings.openapi().url.clone(), get(handlers::openapi)));
    }
    if settings.telemetry().prometheus_enabled {
        builtins.push(("/metrics".to_string(), get(handlers::metrics)));
    }
    builtins.retain(|(path, _)| {
        let shadowed = app.has_route(HttpMethod::Get, path);
        if shadowed {
            tracing::warn!(path = %path, "Application route shadows built-in route");
        }
        !shadowed
    });

    let state = AppState::new(settings, app.metadata().clone(), document, route_patterns);
    let mut router: Router<AppState> = app.into_dispatch_router();
    for (path, method_router) in builtins {
        router = router.route(&path, method_router);
    }

    let request_id_header = HeaderName::from_static("x-request-id");
    let request_id_header_for_span = request_id_header.clone();
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(move |request: &Request<_>| {
            let request_id = request
                .headers()
                .get(&request_id_header_for_span)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(|response: &Response<axum::body::Body>, latency: Duration, _span: &Span| {
            metrics::record_response(response.status(), latency);
        });

    router
        .fallback(handlers::fallback)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins = settings
        .cors()
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, ACCEPT, ORIGIN, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        // Wildcard origin cannot be combined with allow_credentials
        base.allow_origin(Any)
    } else {
        base.allow_credentials(true).allow_origin(AllowOrigin::list(origins))
    }
}
