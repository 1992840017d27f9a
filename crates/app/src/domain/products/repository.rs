//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        collections::records::CollectionUuid,
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
            slug::slugify,
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const CLEAR_FOREIGN_FEATURED_PRODUCT_SQL: &str =
    include_str!("sql/clear_foreign_featured_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let slug = slugify(&product.title);

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.title)
            .bind(slug)
            .bind(product.description)
            .bind(encode_amount(product.price, "price")?)
            .bind(product.inventory)
            .bind(product.collection_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let slug = slugify(&update.title);

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.title)
            .bind(slug)
            .bind(update.description)
            .bind(encode_amount(update.price, "price")?)
            .bind(update.inventory)
            .bind(update.collection_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Unset the product as featured product of any collection other than `keep`.
    #[tracing::instrument(
        name = "products.repository.clear_foreign_featured_product",
        skip(self, tx),
        fields(cleared_count = tracing::field::Empty)
    )]
    pub(crate) async fn clear_foreign_featured_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        keep: CollectionUuid,
    ) -> Result<u64, sqlx::Error> {
        let cleared = query(CLEAR_FOREIGN_FEATURED_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("cleared_count", cleared);

        Ok(cleared)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            inventory: row.try_get("inventory")?,
            collection_uuid: CollectionUuid::from_uuid(row.try_get("collection_uuid")?),
            review_count: try_get_amount(row, "review_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
