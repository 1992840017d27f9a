//! Cancel Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    extensions::*,
    observability::record_order_status,
    orders::{errors::into_status_error, get::OrderResponse},
};

/// Cancel Order Handler
///
/// Owners and staff may cancel an order while it is still pending.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is no longer pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::CancelOrder)?;

    let order = state
        .app
        .orders
        .cancel_order(actor, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_order_status(order.status);

    Ok(Json(order.into()))
}
