//! Small validation and serde helpers shared across the API modules.
//!
//! Home of the merge-patch field deserializer, which distinguishes an
//! absent field from an explicit `null` so PUT payloads can clear nullable
//! columns, and of the required-text check used by create and update
//! handlers.

use serde::{Deserialize, Deserializer};

use crate::errors::ApiError;

/// Trims a required text field, rejecting blank input.
pub fn require_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

/// Deserializes a patch field into `Some(inner)` whenever the field is
/// present: `None` means "leave unchanged", `Some(None)` means "clear",
/// `Some(Some(v))` means "set to v". Pair with `#[serde(default)]`.
pub fn deserialize_patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_patch")]
        breed: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.breed, None);

        let cleared: Patch = serde_json::from_str(r#"{"breed":null}"#).unwrap();
        assert_eq!(cleared.breed, Some(None));

        let set: Patch = serde_json::from_str(r#"{"breed":"corgi"}"#).unwrap();
        assert_eq!(set.breed, Some(Some("corgi".to_owned())));
    }

    #[test]
    fn required_text_is_trimmed_and_must_be_non_blank() {
        assert_eq!(require_text("name", "  Rex  ").unwrap(), "Rex");
        assert!(require_text("name", "   ").is_err());
        assert!(require_text("name", "").is_err());
    }
}
