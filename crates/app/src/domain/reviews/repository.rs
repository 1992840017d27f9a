//! Reviews Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    products::records::ProductUuid,
    reviews::{
        data::NewReview,
        records::{ReviewRecord, ReviewUuid},
    },
    users::records::UserUuid,
};

const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const LIST_REVIEWS_SQL: &str = include_str!("sql/list_reviews.sql");
const GET_REVIEW_SQL: &str = include_str!("sql/get_review.sql");
const LOCK_REVIEW_SQL: &str = include_str!("sql/lock_review.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const UPDATE_REVIEW_SQL: &str = include_str!("sql/update_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_EXISTS_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_REVIEWS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(GET_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a review and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LOCK_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a review signed with the author's username.
    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        author: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(author.into_uuid())
            .bind(review.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        review: ReviewUuid,
        description: String,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(UPDATE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(product.into_uuid())
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        review: ReviewUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            date: row.try_get::<SqlxDate, _>("date")?.to_jiff(),
        })
    }
}
