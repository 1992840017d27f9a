//! Update Collection Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::policy::Operation, domain::collections::data::CollectionUpdate};

use crate::{
    collections::{errors::into_status_error, get::CollectionResponse},
    extensions::*,
    patch::double_option,
};

/// Update Collection Request
///
/// Omitted fields are left unchanged; `"featured_product_uuid": null` clears
/// the featured product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCollectionRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[salvo(schema(value_type = Option<Uuid>))]
    pub featured_product_uuid: Option<Option<Uuid>>,
}

impl From<UpdateCollectionRequest> for CollectionUpdate {
    fn from(request: UpdateCollectionRequest) -> Self {
        CollectionUpdate {
            title: request.title,
            featured_product_uuid: request
                .featured_product_uuid
                .map(|featured| featured.map(Into::into)),
        }
    }
}

/// Update Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Update Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Collection updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
    ),
)]
#[tracing::instrument(
    name = "collections.update",
    skip(collection, json, depot),
    fields(collection_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    collection: PathParam<Uuid>,
    json: JsonBody<UpdateCollectionRequest>,
    depot: &mut Depot,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let collection = collection.into_inner();

    tracing::Span::current().record("collection_uuid", tracing::field::display(collection));

    depot.authorize(Operation::UpdateCollection)?;

    let updated = state
        .app
        .collections
        .update_collection(collection.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(collection_uuid = %collection, "updated collection");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        collections::{CollectionsServiceError, MockCollectionsService, records::CollectionUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{STAFF, collections_service, make_collection};

    use super::*;

    fn make_service(collections: MockCollectionsService) -> Service {
        collections_service(
            collections,
            Some(STAFF),
            Router::with_path("collections/{collection}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_title_leaves_featured_product_alone() -> TestResult {
        let uuid = CollectionUuid::new();

        let mut collections = MockCollectionsService::new();

        collections
            .expect_update_collection()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == CollectionUpdate {
                            title: Some("Tea".to_string()),
                            featured_product_uuid: None,
                        }
            })
            .return_once(move |_, _| {
                let mut collection = make_collection(uuid);

                collection.title = "Tea".to_string();

                Ok(collection)
            });

        let mut res = TestClient::patch(format!("http://example.com/collections/{uuid}"))
            .json(&json!({ "title": "Tea" }))
            .send(&make_service(collections))
            .await;

        let body: CollectionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.title, "Tea");

        Ok(())
    }

    #[tokio::test]
    async fn test_null_featured_product_clears_it() -> TestResult {
        let uuid = CollectionUuid::new();

        let mut collections = MockCollectionsService::new();

        collections
            .expect_update_collection()
            .once()
            .withf(|_, update| update.featured_product_uuid == Some(None))
            .return_once(move |_, _| Ok(make_collection(uuid)));

        let res = TestClient::patch(format!("http://example.com/collections/{uuid}"))
            .json(&json!({ "featured_product_uuid": null }))
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_featured_product_returns_400() -> TestResult {
        let uuid = CollectionUuid::new();
        let product = ProductUuid::new();

        let mut collections = MockCollectionsService::new();

        collections
            .expect_update_collection()
            .once()
            .withf(move |_, update| update.featured_product_uuid == Some(Some(product)))
            .return_once(|_, _| Err(CollectionsServiceError::FeaturedProductNotInCollection));

        let res = TestClient::patch(format!("http://example.com/collections/{uuid}"))
            .json(&json!({ "featured_product_uuid": product }))
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
