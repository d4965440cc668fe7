use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::extract::{query_rejection, JsonBody};
use crate::api::routes::{Application, HttpMethod, MountError, RouteGroup};
use crate::schemas::item::{
    invalid_item_id, parse_item_id, Item, ItemId, ItemQuery, ItemReadResponse,
};
use crate::schemas::validation::ValidationErrors;
use crate::schemas::{AppMetadata, RootResponse};


pub(crate) fn router() -> RouteGroup {
    RouteGroup::new("")
        .route(HttpMethod::Get, "/", "read_root", read_root)
        .route(HttpMethod::Get, "/items/{item_id}", "read_item", read_item)
        .route(HttpMethod::Post, "/items/", "create_item", create_item)
}

pub(crate) fn application() -> Result<Application, MountError> {
    let mut app = Application::new(AppMetadata::default());
    app.include_router(router())?;
    Ok(app)
}

/// Validated inputs of `GET /items/{item_id}`. Path and query problems are
/// reported together.
pub(crate) struct ItemLookup {
    item_id: ItemId,
    q: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ItemLookup
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Undecodable segments (e.g. `%FF`) fail the same way as non-numeric ones.
        let item_id = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw_id)) => parse_item_id(&raw_id),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Path parameters rejected");
                Err(invalid_item_id())
            }
        };
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;

        let (item_id, q) =
            ValidationErrors::combine(item_id, ItemQuery::from_pairs(pairs).validated())?;
        Ok(Self { item_id, q })
    }
}

async fn read_root() -> Json<RootResponse> {
    Json(RootResponse { hello: "World" })
}

async fn read_item(lookup: ItemLookup) -> Json<ItemReadResponse> {
    Json(ItemReadResponse { item_id: lookup.item_id, q: lookup.q })
}

async fn create_item(JsonBody(body): JsonBody) -> Result<Json<Item>, ApiError> {
    let item = Item::from_json(&body)?;
    tracing::debug!(name = %item.name, "Item received");
    Ok(Json(item))
}
