//! Authorization error mapping.

use salvo::http::StatusError;

use storefront_app::auth::policy::PolicyError;

pub(crate) fn policy_status_error(error: PolicyError) -> StatusError {
    match error {
        PolicyError::Unauthenticated => {
            StatusError::unauthorized().brief("Authentication credentials were not provided")
        }
        PolicyError::Forbidden => {
            StatusError::forbidden().brief("You do not have permission to perform this action")
        }
    }
}
