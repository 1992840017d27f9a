//! Product Records

use jiff::Timestamp;

use crate::{domain::collections::records::CollectionUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Price in minor units.
    pub price: u64,

    pub inventory: i32,
    pub collection_uuid: CollectionUuid,

    /// Number of reviews left on the product.
    pub review_count: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Summary
///
/// The slice of a product shown next to cart and order line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub title: String,

    /// Current price in minor units.
    pub price: u64,
}
