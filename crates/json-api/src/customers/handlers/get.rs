//! Get Customer Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::customers::records::CustomerRecord};

use crate::{customers::errors::into_status_error, extensions::*};

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,

    /// The user this profile belongs to
    pub user_uuid: Uuid,

    /// E.164 phone number
    pub phone_number: String,

    /// ISO 8601 calendar date
    pub birth_date: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into_uuid(),
            user_uuid: customer.user_uuid.into_uuid(),
            phone_number: customer.phone_number,
            birth_date: customer.birth_date.map(|date| date.to_string()),
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}

/// Get Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or staff only"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::GetCustomer)?;

    let customer = state
        .app
        .customers
        .get_customer(actor, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
