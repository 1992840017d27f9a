//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::orders::OrderStatus};

use crate::{
    extensions::*,
    observability::record_order_status,
    orders::{errors::into_status_error, get::OrderResponse},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Single-letter status code: P, S, T, O, C, F or X
    pub status: String,
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or illegal transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::SetOrderStatus)?;

    let status: OrderStatus = json.into_inner().status.parse().or_400("unknown order status")?;

    let order = state
        .app
        .orders
        .set_order_status(actor, order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    record_order_status(order.status);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{SHOPPER, STAFF, make_order, orders_service};

    use super::*;

    fn make_service(
        orders: MockOrdersService,
        principal: storefront_app::auth::Principal,
    ) -> Service {
        orders_service(
            orders,
            Some(principal),
            Router::with_path("orders/{order}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_staff_ships_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .withf(move |actor, o, status| {
                *actor == STAFF && *o == uuid && *status == OrderStatus::Shipped
            })
            .return_once(move |_, _, status| Ok(make_order(uuid, status)));

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "status": "S" }))
            .send(&make_service(orders, STAFF))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_code_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_set_order_status().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "shipped" }))
            .send(&make_service(orders, STAFF))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_illegal_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .return_once(|_, _, to| {
                Err(OrdersServiceError::IllegalTransition {
                    from: OrderStatus::Complete,
                    to,
                })
            });

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "P" }))
            .send(&make_service(orders, STAFF))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_shopper_cannot_set_status() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_set_order_status().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "S" }))
            .send(&make_service(orders, SHOPPER))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
