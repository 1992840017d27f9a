//! Delete Review Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{extensions::*, products::reviews::errors::into_status_error};

/// Delete Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Review deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Author or staff only"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::DeleteReview)?;
    let review = review.into_inner();

    state
        .app
        .reviews
        .delete_review(actor, product.into_inner().into(), review.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(review_uuid = %review, "deleted review");

    Ok(StatusCode::NO_CONTENT)
}
