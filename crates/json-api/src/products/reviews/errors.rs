//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::reviews::ReviewsServiceError;

use crate::auth::policy_status_error;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::AlreadyExists => StatusError::conflict().brief("Review already exists"),
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        ReviewsServiceError::Policy(policy) => policy_status_error(policy),
        ReviewsServiceError::Validation(errors) => {
            StatusError::bad_request().brief(format!("Invalid review payload: {errors}"))
        }
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
