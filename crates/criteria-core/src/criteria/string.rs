use crate::{
    criteria::{ComparableCriteria, CriteriaContext},
    error::CriteriaError,
    expr::Operator,
};
use derive_more::Deref;
use std::fmt;

///
/// StringCriteria
///
/// Text attribute criteria: lexicographic ordering and equality through
/// `Deref`, plus substring and emptiness tests.
///

#[derive(Deref)]
pub struct StringCriteria<R> {
    comparable: ComparableCriteria<R, String>,
}

impl<R> StringCriteria<R> {
    /// Wrap a context already bound to a text attribute.
    #[must_use]
    pub const fn new(context: CriteriaContext<R>) -> Self {
        Self {
            comparable: ComparableCriteria::new(context),
        }
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Result<R, CriteriaError> {
        self.context().create(Operator::StartsWith, &prefix.into())
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Result<R, CriteriaError> {
        self.context().create(Operator::EndsWith, &suffix.into())
    }

    /// Case-sensitive substring match.
    pub fn contains(&self, fragment: impl Into<String>) -> Result<R, CriteriaError> {
        self.context().create(Operator::Contains, &fragment.into())
    }

    pub fn is_empty(&self) -> Result<R, CriteriaError> {
        self.context().create_unary(Operator::IsEmpty)
    }

    pub fn is_not_empty(&self) -> Result<R, CriteriaError> {
        self.context().create_unary(Operator::IsNotEmpty)
    }
}

impl<R> Clone for StringCriteria<R> {
    fn clone(&self) -> Self {
        Self {
            comparable: self.comparable.clone(),
        }
    }
}

impl<R> fmt::Debug for StringCriteria<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringCriteria")
            .field("context", self.context())
            .finish()
    }
}
