use crate::{expr::Operator, value::ValueKind};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CriteriaError
///
/// Construction-time failure raised synchronously at the operator call that
/// caused it. Nothing is folded into a context when an error is returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CriteriaError {
    #[error("invalid argument for '{attribute}' {operator}: {source}")]
    InvalidArgument {
        attribute: String,
        operator: Operator,
        source: LiteralError,
    },

    #[error("type mismatch for {operator}: expected {expected}, found {found}")]
    TypeMismatch {
        operator: Operator,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("expression of kind {found} is not a predicate")]
    NotPredicate { found: ValueKind },

    #[error("internal invariant violated: {message}")]
    Invariant { message: String },
}

impl CriteriaError {
    /// Construct an internal invariant violation.
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Stable classification for callers that branch on error kind.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument { .. } => ErrorClass::InvalidArgument,
            Self::TypeMismatch { .. } | Self::NotPredicate { .. } => ErrorClass::TypeMismatch,
            Self::Invariant { .. } => ErrorClass::InvariantViolation,
        }
    }
}

///
/// ErrorClass
///
/// Internal error taxonomy.
/// `InvariantViolation` is never expected through the typed builders and
/// signals a bug in the caller-supplied context or in this crate.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidArgument,
    TypeMismatch,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::TypeMismatch => "type_mismatch",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// LiteralError
///
/// Reasons a value cannot be lifted into a literal node.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum LiteralError {
    #[error("literal value is absent")]
    Null,

    #[error("list literal element {index} is or contains an absent value")]
    NullElement { index: usize },
}
