//! Update Customer Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::customers::data::CustomerUpdate};

use crate::{
    customers::{
        errors::{into_status_error, parse_birth_date},
        get::CustomerResponse,
    },
    extensions::*,
    patch::double_option,
};

/// Update Customer Request
///
/// Omitted fields are left unchanged; `"birth_date": null` clears the date.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCustomerRequest {
    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[salvo(schema(value_type = Option<String>))]
    pub birth_date: Option<Option<String>>,
}

/// Update Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<UpdateCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::UpdateCustomer)?;
    let request = json.into_inner();

    let birth_date = match request.birth_date {
        Some(raw) => Some(parse_birth_date(raw.as_deref())?),
        None => None,
    };

    let customer = state
        .app
        .customers
        .update_customer(
            actor,
            customer.into_inner().into(),
            CustomerUpdate {
                phone_number: request.phone_number,
                birth_date,
            },
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(customer_uuid = %customer.uuid, "updated customer");

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::customers::{
        CustomersServiceError, MockCustomersService, records::CustomerUuid,
    };

    use crate::test_helpers::{SHOPPER, customers_service, make_customer};

    use super::*;

    fn make_service(customers: MockCustomersService) -> Service {
        customers_service(
            customers,
            Some(SHOPPER),
            Router::with_path("customers/{customer}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_clearing_birth_date() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .withf(move |actor, c, update| {
                *actor == SHOPPER
                    && *c == uuid
                    && *update
                        == CustomerUpdate {
                            phone_number: None,
                            birth_date: Some(None),
                        }
            })
            .return_once(move |_, _, _| Ok(make_customer(uuid)));

        let res = TestClient::patch(format!("http://example.com/customers/{uuid}"))
            .json(&json!({ "birth_date": null }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_phone_number_returns_400() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .withf(|_, _, update| update.phone_number.as_deref() == Some("555-0123"))
            .return_once(|_, _, _| Err(CustomersServiceError::InvalidData));

        let res = TestClient::patch(format!("http://example.com/customers/{}", CustomerUuid::new()))
            .json(&json!({ "phone_number": "555-0123" }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
