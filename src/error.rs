//! Error types for the fracfact library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! specific variants for generator parsing, design feasibility, and the
//! combinatorial size ceiling. All conditions are detected analytically
//! (by counting) before any expensive search is started.

use thiserror::Error;

/// The main error type for the fracfact library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Generator Specification Errors ============
    /// The generator string is malformed or internally inconsistent.
    #[error("invalid generator specification: {message}")]
    InvalidSpecification {
        /// Description of what is invalid.
        message: String,
    },

    // ============ Feasibility Errors ============
    /// No feasible design exists for the requested parameters.
    #[error("design not possible: {message}")]
    DesignNotPossible {
        /// Why the design cannot be constructed.
        message: String,
    },

    /// The resolution search derived a main-factor count beyond the
    /// labelling capacity.
    #[error("design requires {required} base factors, exceeding the {max}-factor ceiling")]
    TooManyFactors {
        /// Number of base factors the design would need.
        required: usize,
        /// Maximum supported base factors.
        max: usize,
    },

    // ============ Size Errors ============
    /// The design exceeds the combinatorial ceiling on factors/columns.
    #[error("design with {factors} factors is too large, use {max} factors or less")]
    DesignTooLarge {
        /// Requested number of factors or columns.
        factors: usize,
        /// Maximum supported factors or columns.
        max: usize,
    },

    // ============ Dimension Errors ============
    /// Matrix dimensions are inconsistent with the generator specification.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },

    /// Index is out of bounds.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The maximum valid size.
        size: usize,
    },
}

/// A specialized `Result` type for fracfact operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidSpecification` error.
    #[must_use]
    pub fn invalid_specification(message: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            message: message.into(),
        }
    }

    /// Create a new `DesignNotPossible` error.
    #[must_use]
    pub fn design_not_possible(message: impl Into<String>) -> Self {
        Self::DesignNotPossible {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_specification("letter 'x' is not a main factor");
        assert!(err.to_string().contains("invalid generator specification"));
        assert!(err.to_string().contains("'x'"));

        let err = Error::DesignTooLarge {
            factors: 23,
            max: 20,
        };
        assert!(err.to_string().contains("23"));
        assert!(err.to_string().contains("20"));

        let err = Error::TooManyFactors {
            required: 22,
            max: 20,
        };
        assert!(err.to_string().contains("22"));
        assert!(err.to_string().contains("ceiling"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::design_not_possible("not enough interactions");
        let err2 = Error::design_not_possible("not enough interactions");
        let err3 = Error::design_not_possible("resolution unreachable");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
