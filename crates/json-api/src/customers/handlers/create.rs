//! Create Customer Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::customers::{data::NewCustomer, records::CustomerUuid},
};

use crate::{
    customers::{
        errors::{into_status_error, parse_birth_date},
        get::CustomerResponse,
    },
    extensions::*,
};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    /// User the profile is for; defaults to the caller
    #[serde(default)]
    pub user_uuid: Option<Uuid>,

    /// E.164 phone number, e.g. `+14155550123`
    pub phone_number: String,

    /// ISO 8601 calendar date
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Create Customer Handler
///
/// Users sign up for their own profile; staff may create one for any user.
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "User already has a customer profile"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
#[tracing::instrument(
    name = "customers.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        customer_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::CreateCustomer)?;
    let request = json.into_inner();

    let user_uuid = request
        .user_uuid
        .map_or(actor.user_uuid, Into::into);

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user_uuid));

    let customer = state
        .app
        .customers
        .create_customer(
            actor,
            NewCustomer {
                uuid: CustomerUuid::new(),
                user_uuid,
                phone_number: request.phone_number,
                birth_date: parse_birth_date(request.birth_date.as_deref())?,
            },
        )
        .await
        .map_err(into_status_error)?;

    span.record("customer_uuid", tracing::field::display(customer.uuid));

    res.add_header(LOCATION, format!("/customers/{}", customer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(customer_uuid = %customer.uuid, user_uuid = %user_uuid, "created customer");

    Ok(Json(customer.into()))
}
