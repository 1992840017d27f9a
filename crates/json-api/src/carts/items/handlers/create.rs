//! Create Cart Item Handler

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::carts::{data::NewCartItem, records::CartItemUuid},
};

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
};

/// Create Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

impl From<CreateCartItemRequest> for NewCartItem {
    fn from(request: CreateCartItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Create Cart Item Handler
///
/// Adding a product that is already in the cart increases the quantity of the
/// existing item.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created or merged"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product or invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.create",
    skip(cart, json, depot, res),
    fields(
        cart_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CreateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let cart = cart.into_inner();

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("product_uuid", tracing::field::display(request.product_uuid));
    span.record("quantity", request.quantity);

    depot.authorize(Operation::AddCartItem)?;

    let item = state
        .app
        .carts
        .add_item(cart.into(), request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{cart}/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(cart_uuid = %cart, item_uuid = %item.uuid, quantity = item.quantity, "added cart item");

    Ok(Json(item.into()))
}
