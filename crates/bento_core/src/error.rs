//! # Error Types
//!
//! Construction-time failures. Effects themselves never fail at runtime:
//! a step whose target has gone away is skipped, not reported.

use thiserror::Error;

/// Errors raised while building or driving BENTO components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BentoError {
    /// A carousel needs at least one record to display.
    #[error("carousel has no records to display")]
    EmptyCarousel,

    /// An index was outside the list it addresses.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the list.
        len: usize,
    },

    /// No mounted card carries this slug.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// A configuration value cannot drive the effect.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for BENTO operations.
pub type BentoResult<T> = Result<T, BentoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = BentoError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for list of length 3");
        assert_eq!(
            BentoError::UnknownCard("resume".into()).to_string(),
            "unknown card: resume"
        );
    }
}
