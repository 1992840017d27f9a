//! Collections Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::{
        collections::{
            data::{CollectionUpdate, NewCollection},
            records::{CollectionRecord, CollectionUuid},
        },
        products::records::ProductUuid,
    },
};

const LIST_COLLECTIONS_SQL: &str = include_str!("sql/list_collections.sql");
const GET_COLLECTION_SQL: &str = include_str!("sql/get_collection.sql");
const CREATE_COLLECTION_SQL: &str = include_str!("sql/create_collection.sql");
const UPDATE_COLLECTION_SQL: &str = include_str!("sql/update_collection.sql");
const LOCK_PRODUCT_COLLECTION_SQL: &str = include_str!("sql/lock_product_collection.sql");
const COUNT_COLLECTION_PRODUCTS_SQL: &str = include_str!("sql/count_collection_products.sql");
const DELETE_COLLECTION_SQL: &str = include_str!("sql/delete_collection.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCollectionsRepository;

impl PgCollectionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_collections(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CollectionRecord>, sqlx::Error> {
        query_as::<Postgres, CollectionRecord>(LIST_COLLECTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionUuid,
    ) -> Result<CollectionRecord, sqlx::Error> {
        query_as::<Postgres, CollectionRecord>(GET_COLLECTION_SQL)
            .bind(collection.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: NewCollection,
    ) -> Result<CollectionRecord, sqlx::Error> {
        query_as::<Postgres, CollectionRecord>(CREATE_COLLECTION_SQL)
            .bind(collection.uuid.into_uuid())
            .bind(collection.title)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionUuid,
        update: CollectionUpdate,
    ) -> Result<CollectionRecord, sqlx::Error> {
        let featured = update.featured_product_uuid;

        query_as::<Postgres, CollectionRecord>(UPDATE_COLLECTION_SQL)
            .bind(collection.into_uuid())
            .bind(update.title)
            .bind(featured.is_some())
            .bind(featured.flatten().map(ProductUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns the collection a product belongs to, holding a share lock on the
    /// product row until the transaction ends.
    pub(crate) async fn lock_product_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<CollectionUuid>, sqlx::Error> {
        let collection: Option<Uuid> = query_scalar(LOCK_PRODUCT_COLLECTION_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(collection.map(CollectionUuid::from_uuid))
    }

    pub(crate) async fn count_collection_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_COLLECTION_PRODUCTS_SQL)
            .bind(collection.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COLLECTION_SQL)
            .bind(collection.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CollectionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CollectionUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            featured_product_uuid: row
                .try_get::<Option<Uuid>, _>("featured_product_uuid")?
                .map(ProductUuid::from_uuid),
            products_count: try_get_amount(row, "products_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
