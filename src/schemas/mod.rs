use serde::Serialize;

pub(crate) mod item;
pub(crate) mod openapi;
pub(crate) mod validation;

/// Descriptive metadata published in the OpenAPI `info` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppMetadata {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) version: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            title: "FastAPI".to_string(),
            description: String::new(),
            version: "0.1.0".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    #[serde(rename = "Hello")]
    pub(crate) hello: &'static str,
}
