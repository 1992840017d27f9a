//! Collections service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use validator::Validate;

use crate::{
    database::Db,
    domain::collections::{
        data::{CollectionUpdate, NewCollection},
        errors::CollectionsServiceError,
        records::{CollectionRecord, CollectionUuid},
        repository::PgCollectionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCollectionsService {
    db: Db,
    repository: PgCollectionsRepository,
}

impl PgCollectionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCollectionsRepository::new(),
        }
    }
}

#[async_trait]
impl CollectionsService for PgCollectionsService {
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>, CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let collections = self.repository.list_collections(&mut tx).await?;

        tx.commit().await?;

        Ok(collections)
    }

    async fn get_collection(
        &self,
        collection: CollectionUuid,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let collection = self.repository.get_collection(&mut tx, collection).await?;

        tx.commit().await?;

        Ok(collection)
    }

    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        collection.validate()?;

        if collection.featured_product_uuid.is_some() {
            return Err(CollectionsServiceError::FeaturedProductNotInCollection);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_collection(&mut tx, collection).await?;

        tx.commit().await?;

        info!(collection_uuid = %created.uuid, "created collection");

        Ok(created)
    }

    async fn update_collection(
        &self,
        collection: CollectionUuid,
        update: CollectionUpdate,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        if let Some(Some(product)) = update.featured_product_uuid {
            let owner = self
                .repository
                .lock_product_collection(&mut tx, product)
                .await?;

            if owner != Some(collection) {
                return Err(CollectionsServiceError::FeaturedProductNotInCollection);
            }
        }

        let updated = self
            .repository
            .update_collection(&mut tx, collection, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_collection(
        &self,
        collection: CollectionUuid,
    ) -> Result<(), CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if self
            .repository
            .count_collection_products(&mut tx, collection)
            .await?
            > 0
        {
            return Err(CollectionsServiceError::HasProducts);
        }

        // A product inserted after the count still trips the RESTRICT constraint.
        let rows_affected = self
            .repository
            .delete_collection(&mut tx, collection)
            .await
            .map_err(|error| match CollectionsServiceError::from(error) {
                CollectionsServiceError::InvalidReference => CollectionsServiceError::HasProducts,
                other => other,
            })?;

        if rows_affected == 0 {
            return Err(CollectionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(collection_uuid = %collection, "deleted collection");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CollectionsService: Send + Sync {
    /// Retrieves all collections, ordered by title.
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>, CollectionsServiceError>;

    /// Retrieve a single collection.
    async fn get_collection(
        &self,
        collection: CollectionUuid,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Creates a new, empty collection.
    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Renames a collection or changes its featured product.
    async fn update_collection(
        &self,
        collection: CollectionUuid,
        update: CollectionUpdate,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Deletes a collection that no longer contains products.
    async fn delete_collection(
        &self,
        collection: CollectionUuid,
    ) -> Result<(), CollectionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, records::ProductUuid},
        test::{
            TestContext,
            helpers::{create_collection, create_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_collection_returns_empty_collection() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CollectionUuid::new();

        let collection = ctx
            .collections
            .create_collection(NewCollection {
                uuid,
                title: "Beverages".to_string(),
                featured_product_uuid: None,
            })
            .await?;

        assert_eq!(collection.uuid, uuid);
        assert_eq!(collection.title, "Beverages");
        assert_eq!(collection.products_count, 0);
        assert!(collection.featured_product_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_collection_with_featured_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let existing = create_collection(&ctx, "Existing").await?;
        let product = create_product(&ctx, existing.uuid, "Tea", 10_00).await?;

        let result = ctx
            .collections
            .create_collection(NewCollection {
                uuid: CollectionUuid::new(),
                title: "Fresh".to_string(),
                featured_product_uuid: Some(product.uuid),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(CollectionsServiceError::FeaturedProductNotInCollection)
            ),
            "expected FeaturedProductNotInCollection, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_collection_duplicate_title_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        create_collection(&ctx, "Snacks").await?;

        let result = create_collection(&ctx, "Snacks").await;

        assert!(
            matches!(result, Err(CollectionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_collection_empty_title_fails_validation() {
        let ctx = TestContext::new().await;

        let result = create_collection(&ctx, "").await;

        assert!(
            matches!(result, Err(CollectionsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_collections_counts_products() -> TestResult {
        let ctx = TestContext::new().await;

        let pantry = create_collection(&ctx, "Pantry").await?;
        let bakery = create_collection(&ctx, "Bakery").await?;

        create_product(&ctx, pantry.uuid, "Flour", 3_50).await?;
        create_product(&ctx, pantry.uuid, "Sugar", 2_25).await?;

        let collections = ctx.collections.list_collections().await?;

        let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();

        assert_eq!(titles, vec!["Bakery", "Pantry"], "ordered by title");
        assert_eq!(collections[0].uuid, bakery.uuid);
        assert_eq!(collections[0].products_count, 0);
        assert_eq!(collections[1].products_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_collection_sets_featured_product_from_same_collection() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Cheese").await?;
        let product = create_product(&ctx, collection.uuid, "Brie", 8_99).await?;

        let updated = ctx
            .collections
            .update_collection(
                collection.uuid,
                CollectionUpdate {
                    title: Some("Fine Cheese".to_string()),
                    featured_product_uuid: Some(Some(product.uuid)),
                },
            )
            .await?;

        assert_eq!(updated.title, "Fine Cheese");
        assert_eq!(updated.featured_product_uuid, Some(product.uuid));
        assert_eq!(updated.products_count, 1);

        let cleared = ctx
            .collections
            .update_collection(
                collection.uuid,
                CollectionUpdate {
                    title: None,
                    featured_product_uuid: Some(None),
                },
            )
            .await?;

        assert_eq!(cleared.title, "Fine Cheese");
        assert!(cleared.featured_product_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_collection_rejects_product_from_other_collection() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = create_collection(&ctx, "Fruit").await?;
        let dairy = create_collection(&ctx, "Dairy").await?;
        let milk = create_product(&ctx, dairy.uuid, "Milk", 1_99).await?;

        for featured in [milk.uuid, ProductUuid::new()] {
            let result = ctx
                .collections
                .update_collection(
                    fruit.uuid,
                    CollectionUpdate {
                        title: None,
                        featured_product_uuid: Some(Some(featured)),
                    },
                )
                .await;

            assert!(
                matches!(
                    result,
                    Err(CollectionsServiceError::FeaturedProductNotInCollection)
                ),
                "expected FeaturedProductNotInCollection, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn update_collection_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .collections
            .update_collection(
                CollectionUuid::new(),
                CollectionUpdate {
                    title: Some("Ghost".to_string()),
                    featured_product_uuid: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CollectionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_collection_with_products_returns_has_products() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Frozen").await?;
        let product = create_product(&ctx, collection.uuid, "Peas", 1_50).await?;

        let result = ctx.collections.delete_collection(collection.uuid).await;

        assert!(
            matches!(result, Err(CollectionsServiceError::HasProducts)),
            "expected HasProducts, got {result:?}"
        );

        ctx.products.delete_product(product.uuid).await?;
        ctx.collections.delete_collection(collection.uuid).await?;

        let result = ctx.collections.get_collection(collection.uuid).await;

        assert!(
            matches!(result, Err(CollectionsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_collection_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.collections.delete_collection(CollectionUuid::new()).await;

        assert!(
            matches!(result, Err(CollectionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
