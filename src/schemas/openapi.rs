use std::collections::BTreeMap;

use serde::Serialize;

pub(crate) const OPENAPI_VERSION: &str = "3.1.0";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenApiDocument {
    pub(crate) openapi: &'static str,
    pub(crate) info: OpenApiInfo,
    /// Keyed by public path pattern, then by lowercase method.
    pub(crate) paths: BTreeMap<String, BTreeMap<String, OpenApiOperation>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<OpenApiTag>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenApiInfo {
    pub(crate) title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) description: String,
    pub(crate) version: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenApiOperation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<String>,
    pub(crate) summary: String,
    #[serde(rename = "operationId")]
    pub(crate) operation_id: String,
    pub(crate) responses: BTreeMap<&'static str, OpenApiResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenApiResponse {
    pub(crate) description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OpenApiTag {
    pub(crate) name: String,
}
