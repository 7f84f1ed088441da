use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValueKind
///
/// Semantic type tag carried by attributes and literals.
/// Operand kinds of a comparison must agree; the typed builders guarantee
/// this statically, raw `Expression::call` checks it at runtime.
///
/// IMPORTANT:
/// Discriminants are stable and must not be reordered.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ValueKind {
    Bool = 1,
    Int = 2,
    Uint = 3,
    Float = 4,
    Text = 5,
    Date = 6,
    Timestamp = 7,
    List = 8,
}

impl ValueKind {
    /// Stable byte tag for this kind.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Uint => "Uint",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
            Self::List => "List",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
