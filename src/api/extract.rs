use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::schemas::validation::ValidationIssue;

/// A decoded JSON body whose shape has not been checked yet.
pub(crate) struct JsonBody(pub(crate) Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await.map_err(json_rejection)?;
        Ok(Self(value))
    }
}

pub(crate) fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            ValidationIssue::new(["body"], "JSON decode error", "json_invalid").into()
        }
        JsonRejection::MissingJsonContentType(_) => ValidationIssue::new(
            ["body"],
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )
        .into(),
        other => ApiError::BadRequest(other.body_text()),
    }
}

pub(crate) fn query_rejection(rejection: QueryRejection) -> ApiError {
    ValidationIssue::new(["query"], rejection.body_text(), "query_invalid").into()
}
