//! Delete Customer Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{customers::errors::into_status_error, extensions::*};

/// Delete Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Delete Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Customer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::CONFLICT, description = "Customer has orders"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::DeleteCustomer)?;
    let customer = customer.into_inner();

    state
        .app
        .customers
        .delete_customer(actor, customer.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(customer_uuid = %customer, "deleted customer");

    Ok(StatusCode::NO_CONTENT)
}
