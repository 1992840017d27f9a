//! Products Data

use validator::Validate;

use crate::domain::{collections::records::CollectionUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProduct {
    pub uuid: ProductUuid,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub description: String,

    /// Price in minor units.
    #[validate(range(min = 100, max = 999_999))]
    pub price: u64,

    #[validate(range(min = 0))]
    pub inventory: i32,

    pub collection_uuid: CollectionUuid,
}

/// Product Update Data
///
/// Replaces every editable field of the product.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub description: String,

    #[validate(range(min = 100, max = 999_999))]
    pub price: u64,

    #[validate(range(min = 0))]
    pub inventory: i32,

    pub collection_uuid: CollectionUuid,
}
