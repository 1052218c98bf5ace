//! Deserialisation helpers shared by the wire structs.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like an absent field.
///
/// Pair with `#[serde(default)]` so both cases produce `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        value: String,
    }

    #[test]
    fn null_and_absent_become_default() {
        let from_null: Sample = serde_json::from_str(r#"{"value": null}"#).expect("null");
        let from_absent: Sample = serde_json::from_str("{}").expect("absent");
        assert_eq!(from_null.value, "");
        assert_eq!(from_absent.value, "");
    }

    #[test]
    fn wrong_type_is_still_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"value": 7}"#).is_err());
    }
}
