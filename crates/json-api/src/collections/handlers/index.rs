//! Collection Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::auth::policy::Operation;

use crate::{collections::get::CollectionResponse, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionsResponse {
    /// Collections ordered by title
    pub collections: Vec<CollectionResponse>,
}

/// Collection Index Handler
#[endpoint(tags("collections"), summary = "List Collections")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CollectionsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.authorize(Operation::ListCollections)?;

    let collections = state
        .app
        .collections
        .list_collections()
        .await
        .or_500("failed to fetch collections")?;

    Ok(Json(CollectionsResponse {
        collections: collections.into_iter().map(Into::into).collect(),
    }))
}
