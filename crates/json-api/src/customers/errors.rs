//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::customers::CustomersServiceError;

use crate::{auth::policy_status_error, extensions::*};

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::AlreadyExists => {
            StatusError::conflict().brief("A customer profile already exists for this user")
        }
        CustomersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CustomersServiceError::InvalidReference => {
            StatusError::bad_request().brief("User does not exist")
        }
        CustomersServiceError::HasOrders => StatusError::conflict()
            .brief("Customer cannot be deleted because they have placed orders"),
        CustomersServiceError::Policy(policy) => policy_status_error(policy),
        CustomersServiceError::Validation(errors) => {
            StatusError::bad_request().brief(format!("Invalid customer payload: {errors}"))
        }
        CustomersServiceError::MissingRequiredData | CustomersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid customer payload")
        }
        CustomersServiceError::Sql(source) => {
            error!("customer storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Parse an optional ISO 8601 calendar date from a request body.
pub(crate) fn parse_birth_date(raw: Option<&str>) -> Result<Option<jiff::civil::Date>, StatusError> {
    raw.map(str::parse::<jiff::civil::Date>)
        .transpose()
        .or_400("could not parse \"birth_date\"")
}
