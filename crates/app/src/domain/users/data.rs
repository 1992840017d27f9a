//! User Data

use validator::Validate;

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Unique login name, also used as the author name on reviews.
    #[validate(length(min = 1, max = 150))]
    pub username: String,

    /// Whether the user may perform administrative operations.
    pub is_staff: bool,
}
