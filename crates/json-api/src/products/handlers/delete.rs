//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{extensions::*, products::errors::into_status_error};

/// Delete Product Handler
///
/// Cart items and reviews of the product are removed with it.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is on an order"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let product = product.into_inner();

    depot.authorize(Operation::DeleteProduct)?;

    state
        .app
        .products
        .delete_product(product.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, "deleted product");

    Ok(StatusCode::NO_CONTENT)
}
