//! Partial update payload helpers.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a PATCH body.
///
/// Combined with `#[serde(default)]`, an absent field yields `None`, an
/// explicit `null` yields `Some(None)` and a value yields `Some(Some(value))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
