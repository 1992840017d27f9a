//! Update Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
};

/// Update Cart Handler
///
/// Carts have no client-editable fields; this refreshes the cart's update time.
#[endpoint(
    tags("carts"),
    summary = "Update Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::UpdateCart)?;

    let cart = state
        .app
        .carts
        .update_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
