//! Field decoders for engine payloads.

use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` the same way as a missing field.
///
/// Use with `#[serde(default, deserialize_with = "null_as_default")]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
