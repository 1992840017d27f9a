//! Customer Data

use jiff::civil::Date;
use validator::Validate;

use crate::{
    domain::{customers::records::CustomerUuid, users::records::UserUuid},
    validation::{validate_not_in_future, validate_phone_number},
};

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,

    /// User the profile belongs to; each user has at most one.
    pub user_uuid: UserUuid,

    /// E.164 formatted phone number.
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    #[validate(custom(function = "validate_not_in_future"))]
    pub birth_date: Option<Date>,
}

/// Customer Update Data
///
/// `None` leaves a field untouched; `birth_date: Some(None)` clears the date.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct CustomerUpdate {
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    #[validate(custom(function = "validate_not_in_future"))]
    pub birth_date: Option<Option<Date>>,
}
