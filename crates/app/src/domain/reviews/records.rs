//! Review Records

use jiff::civil::Date;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,

    /// Author of the review.
    pub user_uuid: UserUuid,

    /// Author's username at the time of writing.
    pub name: String,

    pub description: String,
    pub date: Date,
}
