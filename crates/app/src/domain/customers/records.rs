//! Customer Records

use jiff::{Timestamp, civil::Date};

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRecord>;

/// Customer Record
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub user_uuid: UserUuid,
    pub phone_number: String,
    pub birth_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
