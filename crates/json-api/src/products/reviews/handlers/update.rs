//! Update Review Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::reviews::data::ReviewUpdate};

use crate::{
    extensions::*,
    products::reviews::{errors::into_status_error, get::ReviewResponse},
};

/// Update Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateReviewRequest {
    pub description: String,
}

/// Update Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Update Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Author or staff only"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    review: PathParam<Uuid>,
    json: JsonBody<UpdateReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::UpdateReview)?;

    let review = state
        .app
        .reviews
        .update_review(
            actor,
            product.into_inner().into(),
            review.into_inner().into(),
            ReviewUpdate {
                description: json.into_inner().description,
            },
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(review_uuid = %review.uuid, "updated review");

    Ok(Json(review.into()))
}
