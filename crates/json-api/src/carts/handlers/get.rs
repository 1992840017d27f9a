//! Get Cart Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::carts::records::{CartItemRecord, CartRecord},
};

use crate::{
    carts::errors::into_status_error, extensions::*, products::get::ProductSummaryResponse,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of the line totals, in minor units
    pub total_price: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let total_price = cart.total_price();

        CartResponse {
            uuid: cart.uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_price,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product in the cart item
    pub product: ProductSummaryResponse,

    /// Number of units
    pub quantity: u32,

    /// Quantity times the current product price, in minor units
    pub total_price: u64,

    /// The date and time the item was added
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        let total_price = item.line_total();

        Self {
            uuid: item.uuid.into_uuid(),
            product: item.product.into(),
            quantity: item.quantity,
            total_price,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns a cart with its items and total price.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::GetCart)?;

    let cart = state
        .app
        .carts
        .get_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartsServiceError, MockCartsService, records::CartUuid,
    };

    use crate::test_helpers::{carts_service, make_cart, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{cart}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_items_and_total() -> TestResult {
        let uuid = CartUuid::new();

        let mut cart = make_cart(uuid);

        cart.items = vec![make_cart_item(uuid, 10_00, 3), make_cart_item(uuid, 2_50, 2)];

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.items.len(), 2, "expected two items");
        assert_eq!(
            body.items.first().map(|item| item.total_price),
            Some(30_00),
            "first line total"
        );
        assert_eq!(body.total_price, 35_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let uuid = CartUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/carts/not-a-uuid")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
