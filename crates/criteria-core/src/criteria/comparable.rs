use crate::{
    criteria::{CriteriaContext, ObjectCriteria},
    error::CriteriaError,
    expr::{Expression, Operator, Path},
    traits::FieldValue,
};
use derive_more::Deref;
use std::fmt;

///
/// ComparableCriteria
///
/// Ordering operators for one attribute whose value type is totally ordered.
/// Bare names (`is_less_than`, `is_greater_than`) are strict bounds; `At`
/// names (`is_at_most`, `is_at_least`) are inclusive.
///
/// Equality and membership come from [`ObjectCriteria`] through `Deref`.
///
/// Literals must have the attribute's own type:
///
/// ```compile_fail
/// use criteria_core::criteria::{ComparableCriteria, Criterion};
///
/// let age: ComparableCriteria<Criterion, i64> =
///     ComparableCriteria::new(Criterion::context().bind::<i64>("age"));
/// let _ = age.is_less_than("sixty-five");
/// ```
///
/// and the value type must be orderable:
///
/// ```compile_fail
/// use criteria_core::{
///     criteria::{ComparableCriteria, Criterion},
///     traits::FieldValue,
///     value::{Value, ValueKind},
/// };
///
/// #[derive(PartialEq, Eq)]
/// struct Unordered;
///
/// impl FieldValue for Unordered {
///     const KIND: ValueKind = ValueKind::Int;
///
///     fn to_value(&self) -> Value {
///         Value::Int(0)
///     }
/// }
///
/// let age: ComparableCriteria<Criterion, Unordered> =
///     ComparableCriteria::new(Criterion::context().bind::<Unordered>("age"));
/// let _ = age.is_less_than(Unordered);
/// ```
///
/// The same value type with `Ord` compiles:
///
/// ```
/// use criteria_core::{
///     criteria::{ComparableCriteria, Criterion},
///     traits::FieldValue,
///     value::{Value, ValueKind},
/// };
///
/// #[derive(PartialEq, Eq, PartialOrd, Ord)]
/// struct Rank(i64);
///
/// impl FieldValue for Rank {
///     const KIND: ValueKind = ValueKind::Int;
///
///     fn to_value(&self) -> Value {
///         Value::Int(self.0)
///     }
/// }
///
/// let rank: ComparableCriteria<Criterion, Rank> =
///     ComparableCriteria::new(Criterion::context().bind::<Rank>("rank"));
/// assert!(rank.is_less_than(Rank(3)).is_ok());
/// ```
///

#[derive(Deref)]
pub struct ComparableCriteria<R, V> {
    object: ObjectCriteria<R, V>,
}

impl<R, V: FieldValue + Ord> ComparableCriteria<R, V> {
    /// Wrap a context already bound to an attribute of kind `V::KIND`.
    #[must_use]
    pub const fn new(context: CriteriaContext<R>) -> Self {
        Self {
            object: ObjectCriteria::new(context),
        }
    }

    /// Attribute is less than (but not equal to) `upper`.
    /// Use [`Self::is_at_most`] for less *or equal*.
    pub fn is_less_than(&self, upper: V) -> Result<R, CriteriaError> {
        self.context().create(Operator::LessThan, &upper)
    }

    /// Attribute is greater than (but not equal to) `lower`.
    /// Use [`Self::is_at_least`] for greater *or equal*.
    pub fn is_greater_than(&self, lower: V) -> Result<R, CriteriaError> {
        self.context().create(Operator::GreaterThan, &lower)
    }

    /// Attribute is less than or equal to `upper_inclusive`.
    pub fn is_at_most(&self, upper_inclusive: V) -> Result<R, CriteriaError> {
        self.context().create(Operator::LessThanOrEqual, &upper_inclusive)
    }

    /// Attribute is greater than or equal to `lower_inclusive`.
    pub fn is_at_least(&self, lower_inclusive: V) -> Result<R, CriteriaError> {
        self.context().create(Operator::GreaterThanOrEqual, &lower_inclusive)
    }

    /// Closed range `[lower_inclusive, upper_inclusive]`, folded as one
    /// conjunction node.
    pub fn is_between(&self, lower_inclusive: V, upper_inclusive: V) -> Result<R, CriteriaError> {
        self.range(
            (Operator::GreaterThanOrEqual, &lower_inclusive),
            (Operator::LessThanOrEqual, &upper_inclusive),
        )
    }

    /// Half-open range `[lower_inclusive, upper_exclusive)`.
    pub fn is_in_range(&self, lower_inclusive: V, upper_exclusive: V) -> Result<R, CriteriaError> {
        self.range(
            (Operator::GreaterThanOrEqual, &lower_inclusive),
            (Operator::LessThan, &upper_exclusive),
        )
    }

    // Both bounds are lifted before anything is folded.
    fn range(&self, lower: (Operator, &V), upper: (Operator, &V)) -> Result<R, CriteriaError> {
        let context = self.context();
        let lower = context.apply(lower.0, lower.1)?;
        let upper = context.apply(upper.0, upper.1)?;

        Ok(context.fold(Expression::logical(Operator::And, vec![lower, upper])))
    }
}

impl<R, V> Clone for ComparableCriteria<R, V> {
    fn clone(&self) -> Self {
        Self {
            object: self.object.clone(),
        }
    }
}

impl<R, V> fmt::Debug for ComparableCriteria<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparableCriteria")
            .field("context", self.object.context())
            .finish()
    }
}

///
/// SelfComparable
///
/// Comparable criteria whose continuation type is itself: each operator call
/// returns a new `SelfComparable<V>` holding the extended tree, so a bare
/// orderable attribute can be the whole predicate without an enclosing
/// record builder.
///

#[derive(Deref)]
pub struct SelfComparable<V>(ComparableCriteria<SelfComparable<V>, V>);

impl<V: FieldValue + Ord + 'static> SelfComparable<V> {
    /// Standalone builder over an attribute at `path`.
    #[must_use]
    pub fn new(path: impl Into<Path>) -> Self {
        Self::from_context(CriteriaContext::new(Self::from_context).bind::<V>(path))
    }

    /// Continuation used by the context after every fold.
    #[must_use]
    pub const fn from_context(context: CriteriaContext<Self>) -> Self {
        Self(ComparableCriteria::new(context))
    }

    /// Next operator call starts a new disjunct.
    #[must_use]
    pub fn or(&self) -> Self {
        Self::from_context(self.context().or())
    }

    /// Tree held by this instance, `None` before the first operator call.
    #[must_use]
    pub fn expression(&self) -> Option<Expression> {
        self.context().expression()
    }
}

impl<V> Clone for SelfComparable<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V> fmt::Debug for SelfComparable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelfComparable").field(&self.0).finish()
    }
}
