//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{encode_quantity, try_get_amount, try_get_quantity},
    domain::{
        carts::records::CartItemRecord,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        products::records::{ProductSummary, ProductUuid},
    },
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const GET_ORDER_ITEM_SQL: &str = include_str!("../sql/get_order_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Copy cart lines onto an order in a single statement.
    #[tracing::instrument(
        name = "orders.repository.create_order_items",
        skip(self, tx, cart_items),
        fields(item_count = cart_items.len())
    )]
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        cart_items: &[CartItemRecord],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let mut uuids = Vec::with_capacity(cart_items.len());
        let mut products = Vec::with_capacity(cart_items.len());
        let mut quantities = Vec::with_capacity(cart_items.len());

        for item in cart_items {
            uuids.push(OrderItemUuid::new().into_uuid());
            products.push(item.product.uuid.into_uuid());
            quantities.push(encode_quantity(item.quantity, "quantity")?);
        }

        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .fetch_all(&mut **tx)
            .await
    }

    /// Items of every given order, grouped by order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product: ProductSummary {
                uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                title: row.try_get("product_title")?,
                price: try_get_amount(row, "product_price")?,
            },
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
