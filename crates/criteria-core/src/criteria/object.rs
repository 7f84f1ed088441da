use crate::{criteria::CriteriaContext, error::CriteriaError, expr::Operator, traits::FieldValue};
use std::{fmt, marker::PhantomData};

///
/// ObjectCriteria
///
/// Equality and membership over one attribute of value type `V`.
/// Every operator returns `R`, the caller's continuation type.
///

pub struct ObjectCriteria<R, V> {
    context: CriteriaContext<R>,
    _marker: PhantomData<fn() -> V>,
}

impl<R, V> ObjectCriteria<R, V> {
    #[must_use]
    pub const fn context(&self) -> &CriteriaContext<R> {
        &self.context
    }
}

impl<R, V: FieldValue> ObjectCriteria<R, V> {
    /// Wrap a context already bound to an attribute of kind `V::KIND`.
    #[must_use]
    pub const fn new(context: CriteriaContext<R>) -> Self {
        Self {
            context,
            _marker: PhantomData,
        }
    }

    pub fn is_equal_to(&self, value: V) -> Result<R, CriteriaError> {
        self.context.create(Operator::Equal, &value)
    }

    pub fn is_not_equal_to(&self, value: V) -> Result<R, CriteriaError> {
        self.context.create(Operator::NotEqual, &value)
    }

    /// Membership test; the list literal keeps iteration order.
    pub fn is_in<I>(&self, values: I) -> Result<R, CriteriaError>
    where
        I: IntoIterator<Item = V>,
    {
        self.context.create_list(Operator::In, values)
    }

    pub fn is_not_in<I>(&self, values: I) -> Result<R, CriteriaError>
    where
        I: IntoIterator<Item = V>,
    {
        self.context.create_list(Operator::NotIn, values)
    }
}

impl<R, V> Clone for ObjectCriteria<R, V> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for ObjectCriteria<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCriteria")
            .field("context", &self.context)
            .finish()
    }
}
