//! Get Order Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::orders::records::{OrderItemRecord, OrderRecord},
};

use crate::{extensions::*, orders::errors::into_status_error, products::get::ProductSummaryResponse};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: ProductSummaryResponse,
    pub quantity: u32,

    /// Quantity times the product's current price
    pub total_price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        let total_price = item.line_total();

        Self {
            uuid: item.uuid.into_uuid(),
            product: item.product.into(),
            quantity: item.quantity,
            total_price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,

    /// Single-letter status code
    pub status: String,

    /// Human readable status
    pub status_label: String,

    pub items: Vec<OrderItemResponse>,

    /// Sum of the item totals
    pub total_price: u64,

    /// The date and time the order was placed
    pub placed_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        let total_price = order.total_price();

        Self {
            uuid: order.uuid.into_uuid(),
            customer_uuid: order.customer_uuid.into_uuid(),
            status: order.status.code().to_string(),
            status_label: order.status.label().to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_price,
            placed_at: order.placed_at.to_string(),
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::GetOrder)?;

    let order = state
        .app
        .orders
        .get_order(actor, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
