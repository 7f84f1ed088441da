mod float;
mod kind;


use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use float::Float64;
pub use kind::ValueKind;

///
/// Value
///
/// Runtime payload of a literal node.
/// `Null` exists only so absent inputs can be detected and rejected at the
/// literal boundary; it never appears inside a well-formed expression tree.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(NaiveDate),
    Float(Float64),
    Int(i64),
    /// Ordered list of values.
    /// Used for membership literals; order is preserved as supplied.
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Uint(u64),
}

impl Value {
    /// Semantic kind of this value, `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Date(_) => Some(ValueKind::Date),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Int(_) => Some(ValueKind::Int),
            Self::List(_) => Some(ValueKind::List),
            Self::Null => None,
            Self::Text(_) => Some(ValueKind::Text),
            Self::Timestamp(_) => Some(ValueKind::Timestamp),
            Self::Uint(_) => Some(ValueKind::Uint),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `Null` itself or anywhere inside nested lists.
    #[must_use]
    pub fn contains_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::List(items) => items.iter().any(Self::contains_null),
            _ => false,
        }
    }

    /// Borrow the elements of a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}
