//! Create Collection Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::policy::Operation,
    domain::collections::{data::NewCollection, records::CollectionUuid},
};

use crate::{
    collections::{errors::into_status_error, get::CollectionResponse},
    extensions::*,
};

/// Create Collection Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCollectionRequest {
    pub title: String,

    /// Must be empty: a new collection has no products yet.
    #[serde(default)]
    pub featured_product_uuid: Option<Uuid>,
}

impl From<CreateCollectionRequest> for NewCollection {
    fn from(request: CreateCollectionRequest) -> Self {
        NewCollection {
            uuid: CollectionUuid::new(),
            title: request.title,
            featured_product_uuid: request.featured_product_uuid.map(Into::into),
        }
    }
}

/// Create Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Create Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Collection created"),
        (status_code = StatusCode::CONFLICT, description = "Collection already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
    ),
)]
#[tracing::instrument(
    name = "collections.create",
    skip(json, depot, res),
    fields(collection_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCollectionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::CreateCollection)?;

    let collection = state
        .app
        .collections
        .create_collection(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record(
        "collection_uuid",
        tracing::field::display(collection.uuid),
    );

    res.add_header(LOCATION, format!("/collections/{}", collection.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(collection_uuid = %collection.uuid, "created collection");

    Ok(Json(collection.into()))
}
