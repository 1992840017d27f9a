//! Delete Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{carts::errors::into_status_error, extensions::*};

/// Delete Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let item = item.into_inner();

    depot.authorize(Operation::RemoveCartItem)?;

    state
        .app
        .carts
        .remove_item(cart.into_inner().into(), item.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(item_uuid = %item, "removed cart item");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartsServiceError, MockCartsService,
        records::{CartItemUuid, CartUuid},
    };

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{cart}/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_item_returns_204() -> TestResult {
        let cart = CartUuid::new();
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |c, i| *c == cart && *i == item)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/carts/{cart}/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/carts/{}/items/{}",
            CartUuid::new(),
            CartItemUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
