//! Collection Data

use validator::Validate;

use crate::domain::{collections::records::CollectionUuid, products::records::ProductUuid};

/// New Collection Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCollection {
    pub uuid: CollectionUuid,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Always rejected when set: no product can belong to a collection that
    /// does not exist yet.
    pub featured_product_uuid: Option<ProductUuid>,
}

/// Collection Update Data
///
/// `None` leaves a field untouched. `featured_product_uuid: Some(None)` clears
/// the featured product.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct CollectionUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub featured_product_uuid: Option<Option<ProductUuid>>,
}
