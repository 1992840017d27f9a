//! Collection Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::collections::CollectionsServiceError;

pub(crate) fn into_status_error(error: CollectionsServiceError) -> StatusError {
    match error {
        CollectionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A collection with this title already exists")
        }
        CollectionsServiceError::NotFound => StatusError::not_found().brief("Collection not found"),
        CollectionsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Featured product does not exist")
        }
        CollectionsServiceError::FeaturedProductNotInCollection => {
            StatusError::bad_request().brief("Featured product must belong to the collection")
        }
        CollectionsServiceError::HasProducts => StatusError::conflict()
            .brief("Collection cannot be deleted because it includes one or more products"),
        CollectionsServiceError::Validation(errors) => {
            StatusError::bad_request().brief(format!("Invalid collection payload: {errors}"))
        }
        CollectionsServiceError::MissingRequiredData | CollectionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid collection payload")
        }
        CollectionsServiceError::Sql(source) => {
            error!("collection storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
