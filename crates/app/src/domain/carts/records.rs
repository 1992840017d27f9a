//! Cart Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductSummary, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of the line totals at current product prices.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items.iter().map(CartItemRecord::line_total).sum()
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product: ProductSummary,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::products::records::ProductUuid;

    fn item(price: u64, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: CartUuid::new(),
            product: ProductSummary {
                uuid: ProductUuid::new(),
                title: "Widget".to_string(),
                price,
            },
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn total_price_sums_line_totals() {
        let cart = CartRecord {
            uuid: CartUuid::new(),
            items: vec![item(10_00, 3), item(2_50, 2)],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(cart.items[0].line_total(), 30_00);
        assert_eq!(cart.total_price(), 35_00);
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = CartRecord {
            uuid: CartUuid::new(),
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(cart.total_price(), 0);
    }
}
