//! Delete Collection Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::auth::policy::Operation;

use crate::{collections::errors::into_status_error, extensions::*};

/// Delete Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Delete Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Collection deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
        (status_code = StatusCode::CONFLICT, description = "Collection still contains products"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
    ),
)]
pub(crate) async fn handler(
    collection: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let collection = collection.into_inner();

    depot.authorize(Operation::DeleteCollection)?;

    state
        .app
        .collections
        .delete_collection(collection.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(collection_uuid = %collection, "deleted collection");

    Ok(StatusCode::NO_CONTENT)
}
