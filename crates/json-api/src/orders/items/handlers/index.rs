//! Order Item Index Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderItemResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemsResponse {
    pub items: Vec<OrderItemResponse>,
}

/// Order Item Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Order Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Items on the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderItemsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::ListOrderItems)?;

    let items = state
        .app
        .orders
        .list_order_items(actor, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService,
        records::{OrderItemUuid, OrderUuid},
    };

    use crate::test_helpers::{SHOPPER, make_order_item, orders_service};

    use super::*;

    #[tokio::test]
    async fn test_list_order_items() -> TestResult {
        let order = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_order_items()
            .once()
            .withf(move |actor, o| *actor == SHOPPER && *o == order)
            .return_once(move |_, _| {
                Ok(vec![
                    make_order_item(order, OrderItemUuid::new(), 4_00, 2),
                    make_order_item(order, OrderItemUuid::new(), 1_50, 1),
                ])
            });

        let service = orders_service(
            orders,
            Some(SHOPPER),
            Router::with_path("orders/{order}/items").get(handler),
        );

        let response: OrderItemsResponse =
            TestClient::get(format!("http://example.com/orders/{order}/items"))
                .send(&service)
                .await
                .take_json()
                .await?;

        let totals: Vec<u64> = response.items.iter().map(|item| item.total_price).collect();

        assert_eq!(totals, vec![8_00, 1_50]);

        Ok(())
    }
}
