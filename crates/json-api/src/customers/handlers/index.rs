//! Customer Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::auth::policy::Operation;

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    pub customers: Vec<CustomerResponse>,
}

/// Customer Index Handler
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All customers"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::ListCustomers)?;

    let customers = state
        .app
        .customers
        .list_customers(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomersResponse {
        customers: customers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::customers::{MockCustomersService, records::CustomerUuid};

    use crate::test_helpers::{SHOPPER, STAFF, customers_service, make_customer};

    use super::*;

    #[tokio::test]
    async fn test_staff_lists_customers() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .withf(|actor| *actor == STAFF)
            .return_once(|_| Ok(vec![make_customer(CustomerUuid::new())]));

        let service = customers_service(
            customers,
            Some(STAFF),
            Router::with_path("customers").get(handler),
        );

        let response: CustomersResponse = TestClient::get("http://example.com/customers")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.customers.len(), 1, "expected one customer");

        Ok(())
    }

    #[tokio::test]
    async fn test_shopper_cannot_list_customers() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_list_customers().never();

        let service = customers_service(
            customers,
            Some(SHOPPER),
            Router::with_path("customers").get(handler),
        );

        let res = TestClient::get("http://example.com/customers")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
