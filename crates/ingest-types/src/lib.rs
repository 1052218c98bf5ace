//! Small validated primitives shared across the ingestion workspace.
//!
//! - [`NonEmptyText`] for configuration values that must be present and non-blank.
//! - [`StorageId`] for identifiers assigned by a tenant datastore on insert.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed on construction, so `"  "` is rejected the same way `""` is.
/// Configuration loading relies on this to treat blank environment variables as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier a datastore assigned to an inserted record.
///
/// Opaque to the pipeline: it is captured after one insert and embedded verbatim as a
/// reference in a later one. The MongoDB store uses the hex form of an `ObjectId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageId(String);

impl StorageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  https://queue.local/q  ").expect("valid text");
        assert_eq!(text.as_str(), "https://queue.local/q");
    }

    #[test]
    fn non_empty_text_rejects_blank_input() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(" \t\n"), Err(TextError::Empty)));
    }

    #[test]
    fn storage_id_displays_verbatim() {
        let id = StorageId::new("65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }
}
