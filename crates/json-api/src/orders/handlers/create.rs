//! Create Order Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    extensions::*,
    observability::record_order_status,
    orders::{errors::into_status_error, get::OrderResponse},
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// The cart to convert; it is deleted once the order is placed
    pub cart_uuid: Uuid,
}

/// Create Order Handler
///
/// Converts a cart into a pending order on the caller's customer profile.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or no customer profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        cart_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::CreateOrder)?;
    let cart_uuid = json.into_inner().cart_uuid;

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart_uuid));

    let order = state
        .app
        .orders
        .create_order(actor, cart_uuid.into())
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    record_order_status(order.status);

    Ok(Json(order.into()))
}
