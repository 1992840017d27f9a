//! Get Collection Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::collections::records::CollectionRecord};

use crate::{collections::errors::into_status_error, extensions::*};

/// Collection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionResponse {
    /// The unique identifier of the collection
    pub uuid: Uuid,

    /// The collection title
    pub title: String,

    /// The product highlighted for this collection
    pub featured_product_uuid: Option<Uuid>,

    /// Number of products in the collection
    pub products_count: u64,

    /// The date and time the collection was created
    pub created_at: String,

    /// The date and time the collection was last updated
    pub updated_at: String,
}

impl From<CollectionRecord> for CollectionResponse {
    fn from(collection: CollectionRecord) -> Self {
        Self {
            uuid: collection.uuid.into_uuid(),
            title: collection.title,
            featured_product_uuid: collection.featured_product_uuid.map(Into::into),
            products_count: collection.products_count,
            created_at: collection.created_at.to_string(),
            updated_at: collection.updated_at.to_string(),
        }
    }
}

/// Get Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Get Collection",
    responses(
        (status_code = StatusCode::OK, description = "Collection found"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
    ),
)]
pub(crate) async fn handler(
    collection: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::GetCollection)?;

    let collection = state
        .app
        .collections
        .get_collection(collection.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(collection.into()))
}
