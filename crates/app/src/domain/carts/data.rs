//! Cart Data

use validator::Validate;

use crate::domain::{
    carts::records::{CartItemUuid, CartUuid},
    products::records::ProductUuid,
};

/// New Cart Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
    pub uuid: CartUuid,
}

/// New Cart Item Data
///
/// When the cart already holds the product, `quantity` is added to the existing
/// line and `uuid` is discarded.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,

    #[validate(range(min = 1, max = 32767))]
    pub quantity: u32,
}

/// Cart Item Update Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CartItemUpdate {
    #[validate(range(min = 1, max = 32767))]
    pub quantity: u32,
}
