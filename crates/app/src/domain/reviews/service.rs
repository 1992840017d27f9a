//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use validator::Validate;

use crate::{
    auth::{
        Principal,
        policy::{Operation, authorize, authorize_owner},
    },
    database::Db,
    domain::{
        products::records::ProductUuid,
        reviews::{
            data::{NewReview, ReviewUpdate},
            errors::ReviewsServiceError,
            records::{ReviewRecord, ReviewUuid},
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn list_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self.repository.product_exists(&mut tx, product).await? {
            return Err(ReviewsServiceError::ProductNotFound);
        }

        let reviews = self.repository.list_reviews(&mut tx, product).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn get_review(
        &self,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let review = self.repository.get_review(&mut tx, product, review).await?;

        tx.commit().await?;

        Ok(review)
    }

    async fn create_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        authorize(Operation::CreateReview, Some(actor))?;

        review.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_review(&mut tx, product, actor.user_uuid, review)
            .await
            .map_err(|error| match ReviewsServiceError::from(error) {
                ReviewsServiceError::InvalidReference => ReviewsServiceError::ProductNotFound,
                other => other,
            })?;

        tx.commit().await?;

        info!(review_uuid = %created.uuid, product_uuid = %product, "created review");

        Ok(created)
    }

    async fn update_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let existing = self.repository.lock_review(&mut tx, product, review).await?;

        authorize_owner(Operation::UpdateReview, actor, existing.user_uuid)?;

        let updated = self
            .repository
            .update_review(&mut tx, product, review, update.description)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self.repository.lock_review(&mut tx, product, review).await?;

        authorize_owner(Operation::DeleteReview, actor, existing.user_uuid)?;

        let rows_affected = self
            .repository
            .delete_review(&mut tx, product, review)
            .await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(review_uuid = %review, "deleted review");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Reviews of a product, oldest first.
    async fn list_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn get_review(
        &self,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Leave a review on a product, signed with the actor's username.
    async fn create_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Rewrite a review. Only its author or staff may do this.
    async fn update_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    async fn delete_review(
        &self,
        actor: Principal,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::policy::PolicyError,
        domain::products::ProductsService,
        test::{
            TestContext,
            helpers::{create_collection, create_product, create_user},
        },
    };

    use super::*;

    fn new_review(description: &str) -> NewReview {
        NewReview {
            uuid: ReviewUuid::new(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn create_review_signs_with_username() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "critic", false).await?;
        let collection = create_collection(&ctx, "Films").await?;
        let product = create_product(&ctx, collection.uuid, "Metropolis", 20_00).await?;

        let review = ctx
            .reviews
            .create_review(author, product.uuid, new_review("A classic."))
            .await?;

        assert_eq!(review.name, "critic");
        assert_eq!(review.user_uuid, author.user_uuid);
        assert_eq!(review.product_uuid, product.uuid);

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.review_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_review_for_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "lost", false).await?;

        let result = ctx
            .reviews
            .create_review(author, ProductUuid::new(), new_review("Where am I?"))
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        let result = ctx.reviews.list_reviews(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_review_rejects_empty_description() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "terse", false).await?;
        let collection = create_collection(&ctx, "Music").await?;
        let product = create_product(&ctx, collection.uuid, "Silence", 1_00).await?;

        let result = ctx
            .reviews
            .create_review(author, product.uuid, new_review(""))
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_reviews_returns_only_that_products_reviews() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "prolific", false).await?;
        let collection = create_collection(&ctx, "Games").await?;
        let chess = create_product(&ctx, collection.uuid, "Chess", 30_00).await?;
        let go = create_product(&ctx, collection.uuid, "Go", 35_00).await?;

        ctx.reviews
            .create_review(author, chess.uuid, new_review("Timeless."))
            .await?;
        ctx.reviews
            .create_review(author, chess.uuid, new_review("Still timeless."))
            .await?;
        ctx.reviews
            .create_review(author, go.uuid, new_review("Deep."))
            .await?;

        let reviews = ctx.reviews.list_reviews(chess.uuid).await?;

        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.product_uuid == chess.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn only_author_or_admin_can_edit_review() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "writer", false).await?;
        let stranger = create_user(&ctx, "editor", false).await?;
        let admin = create_user(&ctx, "moderator", true).await?;
        let collection = create_collection(&ctx, "Art").await?;
        let product = create_product(&ctx, collection.uuid, "Canvas", 15_00).await?;

        let review = ctx
            .reviews
            .create_review(author, product.uuid, new_review("Blank."))
            .await?;

        let result = ctx
            .reviews
            .update_review(
                stranger,
                product.uuid,
                review.uuid,
                ReviewUpdate {
                    description: "Vandalised.".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::Policy(PolicyError::Forbidden))),
            "expected Forbidden, got {result:?}"
        );

        let updated = ctx
            .reviews
            .update_review(
                author,
                product.uuid,
                review.uuid,
                ReviewUpdate {
                    description: "Blank, but nice.".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.description, "Blank, but nice.");

        let result = ctx
            .reviews
            .delete_review(stranger, product.uuid, review.uuid)
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::Policy(PolicyError::Forbidden))),
            "expected Forbidden, got {result:?}"
        );

        ctx.reviews
            .delete_review(admin, product.uuid, review.uuid)
            .await?;

        let result = ctx.reviews.get_review(product.uuid, review.uuid).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn review_under_other_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "mixed", false).await?;
        let collection = create_collection(&ctx, "Tools").await?;
        let hammer = create_product(&ctx, collection.uuid, "Hammer", 12_00).await?;
        let saw = create_product(&ctx, collection.uuid, "Saw", 18_00).await?;

        let review = ctx
            .reviews
            .create_review(author, hammer.uuid, new_review("Solid."))
            .await?;

        let result = ctx.reviews.get_review(saw.uuid, review.uuid).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_product_removes_its_reviews() -> TestResult {
        let ctx = TestContext::new().await;
        let author = create_user(&ctx, "fleeting", false).await?;
        let collection = create_collection(&ctx, "Discontinued").await?;
        let product = create_product(&ctx, collection.uuid, "Fad", 2_00).await?;

        let review = ctx
            .reviews
            .create_review(author, product.uuid, new_review("Fun while it lasted."))
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.reviews.get_review(product.uuid, review.uuid).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
