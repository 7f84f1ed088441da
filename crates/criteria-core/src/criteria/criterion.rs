use crate::{
    criteria::CriteriaContext,
    error::CriteriaError,
    expr::{Expression, Literal, Operator},
    value::ValueKind,
};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

///
/// Criterion
///
/// A finished predicate. Used as the result type when no enclosing record
/// builder exists, and as the operand of the logical combinators.
///
/// Combinators never flatten or reorder: `a.and(b)` is exactly
/// `And[a, b]`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "Expression", into = "Expression")]
pub struct Criterion {
    expression: Expression,
}

impl Criterion {
    /// Wrap a predicate expression (anything of kind `Bool`).
    pub fn new(expression: Expression) -> Result<Self, CriteriaError> {
        match expression.kind() {
            ValueKind::Bool => Ok(Self { expression }),
            found => Err(CriteriaError::NotPredicate { found }),
        }
    }

    /// Constant predicate.
    #[must_use]
    pub const fn always(value: bool) -> Self {
        Self {
            expression: Expression::literal(Literal::bool(value)),
        }
    }

    /// Root context whose continuation yields a `Criterion`.
    #[must_use]
    pub fn context() -> CriteriaContext<Self> {
        CriteriaContext::new(Self::from_context)
    }

    /// Continuation: materialize the accumulated tree.
    /// An empty context yields `always(true)`.
    #[must_use]
    pub fn from_context(context: CriteriaContext<Self>) -> Self {
        context.expression().map_or_else(
            || Self::always(true),
            |expression| Self { expression },
        )
    }

    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn into_expression(self) -> Expression {
        self.expression
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            expression: Expression::logical(Operator::And, vec![self.expression, other.expression]),
        }
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            expression: Expression::logical(Operator::Or, vec![self.expression, other.expression]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        Self {
            expression: Expression::logical(Operator::Not, vec![self.expression]),
        }
    }
}

impl BitAnd for Criterion {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Criterion {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for Criterion {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::not(self)
    }
}

impl TryFrom<Expression> for Criterion {
    type Error = CriteriaError;

    fn try_from(expression: Expression) -> Result<Self, Self::Error> {
        Self::new(expression)
    }
}

impl From<Criterion> for Expression {
    fn from(criterion: Criterion) -> Self {
        criterion.expression
    }
}
