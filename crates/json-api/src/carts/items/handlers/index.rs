//! Cart Item Index Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemsResponse {
    /// The items in the cart
    pub items: Vec<CartItemResponse>,
}

/// Cart Item Index Handler
#[endpoint(
    tags("carts"),
    summary = "List Cart Items",
    responses(
        (status_code = StatusCode::OK, description = "Cart items"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::ListCartItems)?;

    let items = state
        .app
        .carts
        .list_items(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
