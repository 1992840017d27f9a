//! Review Data

use validator::Validate;

use crate::domain::reviews::records::ReviewUuid;

/// New Review Data
///
/// The product comes from the route and the author from the caller.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewReview {
    pub uuid: ReviewUuid,

    #[validate(length(min = 1))]
    pub description: String,
}

/// Review Update Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ReviewUpdate {
    #[validate(length(min = 1))]
    pub description: String,
}
