//! Get Product Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::products::records::{ProductRecord, ProductSummary},
};

use crate::{extensions::*, products::errors::into_status_error};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub title: String,

    /// URL-friendly form of the title
    pub slug: String,

    pub description: String,

    /// Unit price in minor units
    pub price: u64,

    /// Units in stock
    pub inventory: i32,

    /// The collection the product belongs to
    pub collection_uuid: Uuid,

    /// Number of reviews left on the product
    pub review_count: u64,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            title: product.title,
            slug: product.slug,
            description: product.description,
            price: product.price,
            inventory: product.inventory,
            collection_uuid: product.collection_uuid.into_uuid(),
            review_count: product.review_count,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product summary embedded in cart and order items
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub uuid: Uuid,
    pub title: String,

    /// Current unit price in minor units
    pub price: u64,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            title: product.title,
            price: product.price,
        }
    }
}

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::GetProduct)?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
