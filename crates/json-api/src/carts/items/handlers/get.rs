//! Get Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
};

/// Get Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Get Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::GetCartItem)?;

    let item = state
        .app
        .carts
        .get_item(cart.into_inner().into(), item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
