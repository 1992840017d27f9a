//! Create Review Handler

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::reviews::{data::NewReview, records::ReviewUuid},
};

use crate::{
    extensions::*,
    products::reviews::{errors::into_status_error, get::ReviewResponse},
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub description: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            uuid: ReviewUuid::new(),
            description: request.description,
        }
    }
}

/// Create Review Handler
///
/// The review is signed with the caller's username.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let actor = depot.authorize_principal(Operation::CreateReview)?;
    let product = product.into_inner();

    let review = state
        .app
        .reviews
        .create_review(actor, product.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/products/{product}/reviews/{}", review.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product, review_uuid = %review.uuid, "created review");

    Ok(Json(review.into()))
}
