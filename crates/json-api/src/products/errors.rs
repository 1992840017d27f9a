//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A product with this title already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Collection does not exist")
        }
        ProductsServiceError::InUse => StatusError::conflict()
            .brief("Product cannot be deleted because it is associated with an order item"),
        ProductsServiceError::Validation(errors) => {
            StatusError::bad_request().brief(format!("Invalid product payload: {errors}"))
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
