//! Update Cart Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::carts::data::CartItemUpdate};

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: u32,
}

impl From<UpdateCartItemRequest> for CartItemUpdate {
    fn from(request: UpdateCartItemRequest) -> Self {
        CartItemUpdate {
            quantity: request.quantity,
        }
    }
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Cart item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::UpdateCartItem)?;

    let item = state
        .app
        .carts
        .update_item_quantity(
            cart.into_inner().into(),
            item.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(item_uuid = %item.uuid, quantity = item.quantity, "updated cart item");

    Ok(Json(item.into()))
}
