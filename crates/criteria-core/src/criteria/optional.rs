use crate::{
    criteria::{ComparableCriteria, CriteriaContext, ObjectCriteria},
    error::CriteriaError,
    expr::Operator,
    traits::FieldValue,
};
use std::{fmt, marker::PhantomData};

///
/// OptionalCriteria
///
/// Presence tests for an attribute that may be absent, plus access to the
/// wrapped value's criteria on the same attribute.
///

pub struct OptionalCriteria<R, V> {
    context: CriteriaContext<R>,
    _marker: PhantomData<fn() -> V>,
}

impl<R, V: FieldValue> OptionalCriteria<R, V> {
    #[must_use]
    pub const fn new(context: CriteriaContext<R>) -> Self {
        Self {
            context,
            _marker: PhantomData,
        }
    }

    pub fn is_present(&self) -> Result<R, CriteriaError> {
        self.context.create_unary(Operator::IsPresent)
    }

    pub fn is_absent(&self) -> Result<R, CriteriaError> {
        self.context.create_unary(Operator::IsAbsent)
    }

    /// Equality criteria on the present value.
    #[must_use]
    pub fn value(&self) -> ObjectCriteria<R, V> {
        ObjectCriteria::new(self.context.clone())
    }
}

impl<R, V: FieldValue + Ord> OptionalCriteria<R, V> {
    /// Ordering criteria on the present value.
    #[must_use]
    pub fn comparable(&self) -> ComparableCriteria<R, V> {
        ComparableCriteria::new(self.context.clone())
    }
}

impl<R, V> Clone for OptionalCriteria<R, V> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for OptionalCriteria<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalCriteria")
            .field("context", &self.context)
            .finish()
    }
}
