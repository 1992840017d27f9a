//! Collection Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Collection UUID
pub type CollectionUuid = TypedUuid<CollectionRecord>;

/// Collection Record
#[derive(Debug, Clone)]
pub struct CollectionRecord {
    pub uuid: CollectionUuid,
    pub title: String,
    pub featured_product_uuid: Option<ProductUuid>,

    /// Number of products currently in the collection.
    pub products_count: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
