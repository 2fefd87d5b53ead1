//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the PKIX workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Framing errors (bad lengths, wrong top-level arity, trailing data) are
//!   [`FormatError`]s.
//! - A field holding the wrong primitive shape, including a malformed nested
//!   certificate, is a [`TypeError`] naming the field.
//! - Builder invariant violations are [`StateError`]s.
//! - Every error is fail-fast. Nothing in the workspace produces a partial
//!   value alongside an error.

use thiserror::Error;

use crate::der::Tag;

/// Result alias used across the workspace.
pub type Result<T, E = PkixError> = std::result::Result<T, E>;

/// Top-level error type for the PKIX workspace.
#[derive(Error, Debug)]
pub enum PkixError {
    /// Malformed framing or wrong top-level structure.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A field has the wrong primitive shape.
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// An input was of a kind the operation does not accept.
    #[error("argument error: {0}")]
    Argument(String),

    /// Builder invariant violated.
    #[error("invalid builder state: {0}")]
    State(#[from] StateError),

    /// The content signer could not produce a signature.
    #[error("signer error: {0}")]
    Signer(String),

    /// Decode limits could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing to a signer output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error in the tag/length/value framing or in the arity of a structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No bytes, or an empty top-level structure.
    #[error("empty or null input")]
    EmptyInput,

    /// A structure has the wrong number of elements.
    #[error("wrong arity: expected {expected} elements, got {got}")]
    WrongArity {
        /// Number of elements the structure defines.
        expected: usize,
        /// Number of elements found.
        got: usize,
    },

    /// The input ended before a declared length was satisfied.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the header or length.
        needed: usize,
        /// Bytes actually left.
        remaining: usize,
    },

    /// The BER indefinite-length form (`0x80`) appeared.
    #[error("indefinite length encoding is not permitted in DER")]
    IndefiniteLength,

    /// A long-form length that could have been shorter.
    #[error("length is not minimally encoded")]
    NonMinimalLength,

    /// A length too large to address.
    #[error("length does not fit in usize")]
    LengthOverflow,

    /// Multi-byte tag numbers are not used by any structure here.
    #[error("high tag number form is not supported (identifier octet {0:#04x})")]
    HighTagNumber(u8),

    /// Bytes left over after the top-level value.
    #[error("{remaining} trailing bytes after top-level value")]
    TrailingData {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// The input exceeds `DecodeLimits::max_input_len`.
    #[error("input of {len} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// Input length.
        len: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Values nest deeper than `DecodeLimits::max_depth`.
    #[error("nesting exceeds depth limit of {limit}")]
    TooDeep {
        /// Configured limit.
        limit: usize,
    },

    /// A SET OF exceeds `DecodeLimits::max_set_members`.
    #[error("set of {count} members exceeds limit of {limit}")]
    TooManyMembers {
        /// Member count found.
        count: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// A field does not have the primitive shape its structure requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The field carries a different tag.
    #[error("{field}: expected {expected}, got {actual}")]
    UnexpectedTag {
        /// Field name.
        field: &'static str,
        /// Tag the structure requires.
        expected: Tag,
        /// Tag found.
        actual: Tag,
    },

    /// The field has the right tag but invalid contents.
    #[error("{field}: {reason}")]
    Malformed {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// An INTEGER that does not fit the field's range.
    #[error("{field}: integer out of range")]
    OutOfRange {
        /// Field name.
        field: &'static str,
    },
}

impl TypeError {
    /// Shorthand for [`TypeError::Malformed`].
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            reason: reason.into(),
        }
    }
}

/// Proof-of-possession builder invariant violation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// Both authentication alternatives are present.
    #[error("sender and mac both set")]
    SenderAndMacBothSet,

    /// No authentication alternative is present.
    #[error("neither sender nor mac set")]
    NeitherSenderNorMacSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = PkixError::from(FormatError::EmptyInput);
        assert_eq!(err.to_string(), "format error: empty or null input");
    }

    #[test]
    fn test_wrong_arity_reports_count() {
        let err = FormatError::WrongArity {
            expected: 2,
            got: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 2"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_unexpected_tag_names_field() {
        let err = TypeError::UnexpectedTag {
            field: "version",
            expected: Tag::INTEGER,
            actual: Tag::OCTET_STRING,
        };
        assert_eq!(
            err.to_string(),
            "version: expected INTEGER, got OCTET STRING"
        );
    }

    #[test]
    fn test_state_error_messages() {
        assert_eq!(
            StateError::SenderAndMacBothSet.to_string(),
            "sender and mac both set"
        );
        assert_eq!(
            StateError::NeitherSenderNorMacSet.to_string(),
            "neither sender nor mac set"
        );
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        let err = PkixError::from(io_err);
        assert!(err.to_string().contains("sink closed"));
    }
}
