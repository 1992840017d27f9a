//! Review Index Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{
    extensions::*,
    products::reviews::{errors::into_status_error, get::ReviewResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// Reviews ordered by date
    pub reviews: Vec<ReviewResponse>,
}

/// Review Index Handler
#[endpoint(
    tags("reviews"),
    summary = "List Product Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Reviews of the product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::ListReviews)?;

    let reviews = state
        .app
        .reviews
        .list_reviews(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}
