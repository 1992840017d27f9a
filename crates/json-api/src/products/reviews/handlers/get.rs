//! Get Review Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::reviews::records::ReviewRecord};

use crate::{extensions::*, products::reviews::errors::into_status_error};

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,

    /// The user who wrote the review
    pub user_uuid: Uuid,

    /// Author name shown next to the review
    pub name: String,

    pub description: String,

    /// Calendar date the review was written
    pub date: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            product_uuid: review.product_uuid.into_uuid(),
            user_uuid: review.user_uuid.into_uuid(),
            name: review.name,
            description: review.description,
            date: review.date.to_string(),
        }
    }
}

/// Get Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Get Review",
    responses(
        (status_code = StatusCode::OK, description = "Review found"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::GetReview)?;

    let review = state
        .app
        .reviews
        .get_review(product.into_inner().into(), review.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
