//! Create Cart Handler

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use storefront_app::{
    auth::policy::Operation,
    domain::carts::{data::NewCart, records::CartUuid},
};

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
};

/// Create Cart Handler
///
/// Carts are anonymous; the server picks the identifier.
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::CreateCart)?;

    let cart = state
        .app
        .carts
        .create_cart(NewCart {
            uuid: CartUuid::new(),
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{}", cart.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(cart_uuid = %cart.uuid, "created cart");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts").post(handler))
    }

    #[tokio::test]
    async fn test_create_cart_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .return_once(|new| Ok(make_cart(new.uuid)));

        let mut res = TestClient::post("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/carts/{}", body.uuid).as_str()));
        assert!(body.items.is_empty(), "new carts have no items");
        assert_eq!(body.total_price, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_cart_conflict_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
