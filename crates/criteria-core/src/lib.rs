//! Core runtime for typed criteria: literal values, the predicate expression
//! tree with its operator registry, and the fluent builders that produce it.
//!
//! Builders are parameterized by a result type `R` (what each operator call
//! returns) and a value type `V` (what literals must be), so a text attribute
//! can never be compared with a number and every call composes without casts.
//! Translating or evaluating the finished tree is left to consumers.
#![warn(unreachable_pub)]

pub mod criteria;
pub mod error;
pub mod expr;
pub mod traits;
pub mod value;

///
/// Prelude
///
/// Prelude contains only builder vocabulary and the tree types consumers match on.
///

pub mod prelude {
    pub use crate::{
        criteria::{
            CollectionCriteria, ComparableCriteria, CriteriaContext, Criterion, ObjectCriteria,
            OptionalCriteria, SelfComparable, StringCriteria,
        },
        error::CriteriaError,
        expr::{AttributeRef, Call, Expression, Literal, Operator, Path},
        traits::FieldValue as _,
        value::{Float64, Value, ValueKind},
    };
}
