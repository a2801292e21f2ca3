//! Unified error types for the domain layer
//!
//! Every rule violation the creature model or the dice engine can detect is
//! expressed here, so adapters never have to fall back to `String` or `anyhow`.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A numeric value fell outside its fixed domain
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Malformed identifier (e.g. a creature name with digits)
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Name is well-formed but not part of a closed vocabulary
    #[error("Unknown {kind}: {name}")]
    UnknownEntity { kind: &'static str, name: String },

    /// Die shape outside {4, 6, 8, 10, 12, 20, 100}
    #[error("Unsupported die: d{0}")]
    UnsupportedDie(i64),

    /// Dice count below one
    #[error("Invalid dice count: {0}")]
    InvalidCount(i64),
}

impl DomainError {
    /// Create an out-of-range error for a bounded field.
    ///
    /// # Example
    /// ```ignore
    /// if !(1..=20).contains(&value) {
    ///     return Err(DomainError::out_of_range("level", value, 1, 20));
    /// }
    /// ```
    pub fn out_of_range(
        field: &'static str,
        value: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }

    /// Creates an unknown-entity error for closed-vocabulary lookups.
    ///
    /// Use this in `FromStr` implementations of the ability, skill and
    /// saving-throw enums when the input matches no variant.
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind,
            name: name.into(),
        }
    }

    /// Create an unsupported die error
    pub fn unsupported_die(sides: impl Into<i64>) -> Self {
        Self::UnsupportedDie(sides.into())
    }

    /// Create an invalid dice count error
    pub fn invalid_count(count: impl Into<i64>) -> Self {
        Self::InvalidCount(count.into())
    }

    /// Short machine-readable kind, used by the HTTP layer in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidName(_) => "invalid_name",
            Self::UnknownEntity { .. } => "unknown_entity",
            Self::UnsupportedDie(_) => "unsupported_die",
            Self::InvalidCount(_) => "invalid_count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_error() {
        let err = DomainError::out_of_range("strength", 31, 1, 30);
        assert!(matches!(err, DomainError::OutOfRange { .. }));
        assert_eq!(err.to_string(), "strength value 31 is out of range [1, 30]");
    }

    #[test]
    fn test_unknown_entity_error() {
        let err = DomainError::unknown("skill", "juggling");
        assert_eq!(err.to_string(), "Unknown skill: juggling");
        assert_eq!(err.kind(), "unknown_entity");
    }

    #[test]
    fn test_dice_errors() {
        assert_eq!(
            DomainError::unsupported_die(7).to_string(),
            "Unsupported die: d7"
        );
        assert_eq!(
            DomainError::invalid_count(0).to_string(),
            "Invalid dice count: 0"
        );
    }
}
