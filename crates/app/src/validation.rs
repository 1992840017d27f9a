//! Custom field validators shared by the domain input types.

use std::borrow::Cow;

use jiff::{Zoned, civil::Date};
use validator::ValidationError;

const PHONE_NUMBER_MIN_DIGITS: usize = 8;
const PHONE_NUMBER_MAX_DIGITS: usize = 15;

/// Accepts E.164 numbers: a leading `+` followed by 8 to 15 digits.
pub(crate) fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value
        .strip_prefix('+')
        .ok_or_else(|| invalid("phone_number", "phone number must start with '+'"))?;

    if !(PHONE_NUMBER_MIN_DIGITS..=PHONE_NUMBER_MAX_DIGITS).contains(&digits.len())
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(invalid(
            "phone_number",
            "phone number must contain 8 to 15 digits",
        ));
    }

    Ok(())
}

/// Rejects dates after today in the system time zone.
pub(crate) fn validate_not_in_future(value: &Date) -> Result<(), ValidationError> {
    if *value > Zoned::now().date() {
        return Err(invalid("birth_date", "birth date cannot be in the future"));
    }

    Ok(())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
