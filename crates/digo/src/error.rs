//! Decode and validation errors.
//!
//! Every error renders as `field: <name> <reason>` when it concerns the JSON
//! side of a field, or `struct: <ident> <reason>` when it concerns the
//! destination record. Callers may match on these strings.

use std::fmt;
use thiserror::Error;

/// The type a field was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    String,
    Integer,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedType::String => f.write_str("a string"),
            ExpectedType::Integer => f.write_str("an integer"),
        }
    }
}

/// Which side of a `minmax` range was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// String shorter than `min` characters.
    TooShort,
    /// String longer than `max` characters.
    TooLong,
    /// Integer below `min`.
    TooSmall,
    /// Integer above `max`.
    TooBig,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RangeBound::TooShort => "too short",
            RangeBound::TooLong => "too long",
            RangeBound::TooSmall => "too small",
            RangeBound::TooBig => "too big",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a JSON object.
    #[error(transparent)]
    MalformedInput(#[from] serde_json::Error),

    /// The annotation has fewer than two segments.
    #[error("field: {ident} is incorrect")]
    InvalidAnnotation { ident: String },

    #[error("field: {name} invalid digo type")]
    InvalidFieldKind { name: String },

    #[error("field: {name} minmax invalid call")]
    InvalidConstraintSyntax { name: String },

    /// Only raised under [`UnknownConstraintPolicy::Reject`](crate::UnknownConstraintPolicy::Reject).
    #[error("field: {name} unknown constraint {constraint}")]
    UnknownConstraint { name: String, constraint: String },

    #[error("field: {name} is not {expected}")]
    FieldTypeMismatch { name: String, expected: ExpectedType },

    #[error("struct: {ident} is not {expected}")]
    DestinationTypeMismatch { ident: String, expected: ExpectedType },

    #[error("field: {name} is required")]
    RequiredViolation { name: String },

    #[error("field: {name} is {bound}")]
    RangeViolation { name: String, bound: RangeBound },

    #[error("field: {name} is not a valid email address")]
    EmailFormatViolation { name: String },
}

impl DecodeError {
    /// The JSON name or record identifier this error refers to.
    ///
    /// Returns `None` for malformed input, which is not tied to a field.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedInput(_) => None,
            DecodeError::InvalidAnnotation { ident }
            | DecodeError::DestinationTypeMismatch { ident, .. } => Some(ident.as_str()),
            DecodeError::InvalidFieldKind { name }
            | DecodeError::InvalidConstraintSyntax { name }
            | DecodeError::UnknownConstraint { name, .. }
            | DecodeError::FieldTypeMismatch { name, .. }
            | DecodeError::RequiredViolation { name }
            | DecodeError::RangeViolation { name, .. }
            | DecodeError::EmailFormatViolation { name } => Some(name.as_str()),
        }
    }
}
