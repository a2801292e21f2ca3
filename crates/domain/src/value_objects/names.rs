//! Validated creature name
//!
//! The name is the primary key of a creature, so it is valid by construction:
//! - Non-empty after trimming
//! - Within length limits
//! - Letters and spaces only

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a creature name
const MAX_NAME_LENGTH: usize = 200;

/// A validated creature name (non-empty, <=200 chars, ASCII letters and spaces, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreatureName(String);

impl CreatureName {
    /// Create a new validated creature name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    /// - The name contains anything other than ASCII letters and spaces
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_name("Creature name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::invalid_name(format!(
                "Creature name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ')
        {
            return Err(DomainError::invalid_name(format!(
                "Creature name '{}' may contain only letters and spaces",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CreatureName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CreatureName {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CreatureName> for String {
    fn from(name: CreatureName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_and_spaces() {
        let name = CreatureName::new("  Aria Swiftwind ").unwrap();
        assert_eq!(name.as_str(), "Aria Swiftwind");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(matches!(
            CreatureName::new(""),
            Err(DomainError::InvalidName(_))
        ));
        assert!(matches!(
            CreatureName::new("   "),
            Err(DomainError::InvalidName(_))
        ));
    }

    #[test]
    fn rejects_digits_and_punctuation() {
        assert!(CreatureName::new("Aria2").is_err());
        assert!(CreatureName::new("Aria-Swift").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(CreatureName::new(long).is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let parsed: Result<CreatureName, _> = serde_json::from_str("\"Bad1\"");
        assert!(parsed.is_err());
        let ok: CreatureName = serde_json::from_str("\"Aria\"").unwrap();
        assert_eq!(ok.as_str(), "Aria");
    }
}
