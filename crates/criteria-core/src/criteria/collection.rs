use crate::{criteria::CriteriaContext, error::CriteriaError, expr::Operator, traits::FieldValue};
use std::{fmt, marker::PhantomData};

///
/// CollectionCriteria
///
/// Criteria over a list attribute whose elements have type `V`.
/// The bound attribute's kind is `List`; literals are elements or sizes.
///

pub struct CollectionCriteria<R, V> {
    context: CriteriaContext<R>,
    _marker: PhantomData<fn() -> V>,
}

impl<R, V: FieldValue> CollectionCriteria<R, V> {
    /// Wrap a context already bound to a list attribute.
    #[must_use]
    pub const fn new(context: CriteriaContext<R>) -> Self {
        Self {
            context,
            _marker: PhantomData,
        }
    }

    /// Collection has at least one element equal to `element`.
    pub fn contains(&self, element: V) -> Result<R, CriteriaError> {
        self.context.create(Operator::Contains, &element)
    }

    pub fn is_empty(&self) -> Result<R, CriteriaError> {
        self.context.create_unary(Operator::IsEmpty)
    }

    pub fn is_not_empty(&self) -> Result<R, CriteriaError> {
        self.context.create_unary(Operator::IsNotEmpty)
    }

    pub fn has_size(&self, size: usize) -> Result<R, CriteriaError> {
        let size = u64::try_from(size).map_err(|_| {
            CriteriaError::invariant(format!("collection size {size} exceeds u64"))
        })?;

        self.context.create(Operator::HasSize, &size)
    }
}

impl<R, V> Clone for CollectionCriteria<R, V> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for CollectionCriteria<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionCriteria")
            .field("context", &self.context)
            .finish()
    }
}
