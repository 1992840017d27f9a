//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub uuid: UserUuid,

    /// Unique login name.
    pub username: String,

    /// Administrator flag.
    pub is_staff: bool,

    /// User creation timestamp.
    pub created_at: Timestamp,
}
