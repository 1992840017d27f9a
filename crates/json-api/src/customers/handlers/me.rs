//! Own Customer Handler

use salvo::prelude::*;

use storefront_app::auth::policy::Operation;

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
};

/// Own Customer Handler
///
/// Returns the customer profile of the signed-in user.
#[endpoint(
    tags("customers"),
    summary = "Get Own Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer found"),
        (status_code = StatusCode::NOT_FOUND, description = "No customer profile yet"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign-in required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::GetOwnCustomer)?;

    let customer = state
        .app
        .customers
        .find_customer_by_user(actor.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
