use std::sync::Arc;

use crate::api::routes::pattern_matches;
use crate::core::config::Settings;
use crate::schemas::openapi::OpenApiDocument;
use crate::schemas::AppMetadata;

/// Read-only data shared by every request of one application.
#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    metadata: AppMetadata,
    openapi: OpenApiDocument,
    route_patterns: Vec<String>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        metadata: AppMetadata,
        openapi: OpenApiDocument,
        route_patterns: Vec<String>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, metadata, openapi, route_patterns }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn metadata(&self) -> &AppMetadata {
        &self.inner.metadata
    }

    pub(crate) fn openapi(&self) -> &OpenApiDocument {
        &self.inner.openapi
    }

    /// Whether some registered route pattern accepts `path`.
    pub(crate) fn matches_route(&self, path: &str) -> bool {
        self.inner.route_patterns.iter().any(|pattern| pattern_matches(pattern, path))
    }
}
