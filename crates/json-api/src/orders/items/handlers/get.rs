//! Get Order Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderItemResponse},
};

/// Get Order Item Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::GetOrderItem)?;

    let item = state
        .app
        .orders
        .get_order_item(actor, order.into_inner().into(), item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
