use std::fmt;

use thiserror::Error;

/// Classified failures that can arise from type parsing, encoding, or decoding.
///
/// Every variant carries enough context (the canonical type string and, for
/// decode failures, the byte offset) to point a caller at the failing type
/// without them needing to re-derive it from the call site.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// The type descriptor string itself is malformed (unbalanced
    /// parentheses, a stray character, an unrecognized identifier, ...).
    #[error("malformed type string {type_string:?}: {reason}")]
    ParseError { type_string: String, reason: String },

    /// The type string parsed but violates a primitive-specific constraint,
    /// e.g. `uint7`, `bytes33`, `fixed0x0`.
    #[error("invalid type {type_string:?}: {reason}")]
    ValidationError { type_string: String, reason: String },

    /// An integer value falls outside the representable range of its
    /// declared bit width.
    #[error("value out of range for type {type_string}")]
    ValueOutOfRange { type_string: String },

    /// A fixed-size bytes or fixed-size array value's length disagrees
    /// with its declared size.
    #[error("wrong length for type {type_string}: expected {expected}, got {actual}")]
    WrongLength {
        type_string: String,
        expected: usize,
        actual: usize,
    },

    /// The decoder reached the end of the input before it could finish
    /// reading a primitive or composite value.
    #[error("insufficient data decoding {type_string} at byte offset {offset}")]
    InsufficientData { type_string: String, offset: usize },

    /// A decoded 32-byte word carries non-conforming padding bits (dirty
    /// high bytes on an integer, a non-zero tail on a fixed-size byte
    /// string, and so on).
    #[error("non-empty padding decoding {type_string} at byte offset {offset}")]
    NonEmptyPadding { type_string: String, offset: usize },

    /// A dynamic member's head offset points outside the buffer that
    /// contains it.
    #[error("offset {offset} for {type_string} points outside the buffer (len {buffer_len})")]
    InvalidOffset {
        type_string: String,
        offset: usize,
        buffer_len: usize,
    },
}

impl AbiError {
    pub fn parse(type_string: impl Into<String>, reason: impl fmt::Display) -> Self {
        AbiError::ParseError {
            type_string: type_string.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(type_string: impl Into<String>, reason: impl fmt::Display) -> Self {
        AbiError::ValidationError {
            type_string: type_string.into(),
            reason: reason.to_string(),
        }
    }
}
