use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Arity
///
/// Number of operands an operator accepts.
/// `Variadic` means two or more.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Unary,
    Binary,
    Variadic,
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, operands: usize) -> bool {
        match self {
            Self::Unary => operands == 1,
            Self::Binary => operands == 2,
            Self::Variadic => operands >= 2,
        }
    }
}

///
/// Operator
///
/// Closed operator set. Consumers (translators, evaluators) match on it
/// exhaustively, so adding a variant is a compile-checked change everywhere.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum Operator {
    // comparison
    Equal = 0x01,
    NotEqual = 0x02,
    LessThan = 0x03,
    LessThanOrEqual = 0x04,
    GreaterThan = 0x05,
    GreaterThanOrEqual = 0x06,

    // membership
    In = 0x07,
    NotIn = 0x08,

    // text / collection
    StartsWith = 0x09,
    EndsWith = 0x0a,
    Contains = 0x0b,
    IsEmpty = 0x0c,
    IsNotEmpty = 0x0d,
    HasSize = 0x0e,

    // optional
    IsPresent = 0x0f,
    IsAbsent = 0x10,

    // logical
    And = 0x11,
    Or = 0x12,
    Not = 0x13,
}

impl Operator {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Equal
            | Self::NotEqual
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::In
            | Self::NotIn
            | Self::StartsWith
            | Self::EndsWith
            | Self::Contains
            | Self::HasSize => Arity::Binary,
            Self::IsEmpty | Self::IsNotEmpty | Self::IsPresent | Self::IsAbsent | Self::Not => {
                Arity::Unary
            }
            Self::And | Self::Or => Arity::Variadic,
        }
    }

    /// Equality and ordering operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
        )
    }

    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Strict or inclusive ordering.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }

    /// Infix or keyword spelling used by the renderers.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::StartsWith => "STARTS WITH",
            Self::EndsWith => "ENDS WITH",
            Self::Contains => "CONTAINS",
            Self::IsEmpty => "IS EMPTY",
            Self::IsNotEmpty => "IS NOT EMPTY",
            Self::HasSize => "HAS SIZE",
            Self::IsPresent => "IS PRESENT",
            Self::IsAbsent => "IS ABSENT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
