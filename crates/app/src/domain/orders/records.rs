//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        customers::records::CustomerUuid, orders::status::OrderStatus,
        products::records::ProductSummary, users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,

    /// User owning the customer profile the order was placed by.
    pub customer_user_uuid: UserUuid,

    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub placed_at: Timestamp,
}

impl OrderRecord {
    /// Sum of the line totals at current product prices.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items.iter().map(OrderItemRecord::line_total).sum()
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product: ProductSummary,
    pub quantity: u32,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}
