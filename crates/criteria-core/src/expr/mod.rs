//! Module: expr
//! Responsibility: immutable predicate expression tree and the operator
//! registry that builds call nodes.
//! Does not own: how trees are accumulated by builders (see `criteria`).
//! Boundary: the tree is the only thing handed to external translators.

mod operator;
mod path;
mod render;
mod visitor;


use crate::{
    error::{CriteriaError, LiteralError},
    traits::FieldValue,
    value::{Value, ValueKind},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// re-exports
pub use operator::{Arity, Operator};
pub use path::{AttributeRef, Path};
pub use render::DebugRenderer;
pub use visitor::ExpressionVisitor;

///
/// Expression
///
/// Tagged union of the three node kinds. Call nodes are reference-counted so
/// accumulated trees can be shared between builder results without copying.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Expression {
    Attribute(AttributeRef),
    Literal(Literal),
    Call(Arc<Call>),
}

impl Expression {
    #[must_use]
    pub const fn attribute(attribute: AttributeRef) -> Self {
        Self::Attribute(attribute)
    }

    #[must_use]
    pub const fn literal(literal: Literal) -> Self {
        Self::Literal(literal)
    }

    /// Semantic kind of the value this node evaluates to.
    /// Every call node is a predicate.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Attribute(attribute) => attribute.kind,
            Self::Literal(literal) => literal.kind,
            Self::Call(_) => ValueKind::Bool,
        }
    }

    #[must_use]
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Operator registry
    // ------------------------------------------------------------------

    /// Build an operator application, checking arity and operand kinds.
    pub fn call(op: Operator, operands: Vec<Self>) -> Result<Self, CriteriaError> {
        if !op.arity().accepts(operands.len()) {
            return Err(CriteriaError::invariant(format!(
                "{op} expects {:?} operands, got {}",
                op.arity(),
                operands.len()
            )));
        }
        check_operand_kinds(op, &operands)?;

        Ok(Self::Call(Arc::new(Call { op, operands })))
    }

    pub fn binary(op: Operator, left: Self, right: Self) -> Result<Self, CriteriaError> {
        Self::call(op, vec![left, right])
    }

    pub fn unary(op: Operator, operand: Self) -> Result<Self, CriteriaError> {
        Self::call(op, vec![operand])
    }

    pub fn and(operands: Vec<Self>) -> Result<Self, CriteriaError> {
        Self::call(Operator::And, operands)
    }

    pub fn or(operands: Vec<Self>) -> Result<Self, CriteriaError> {
        Self::call(Operator::Or, operands)
    }

    pub fn not(operand: Self) -> Result<Self, CriteriaError> {
        Self::call(Operator::Not, vec![operand])
    }

    /// Logical call over operands already known to be predicates.
    /// Skips the registry checks; callers guarantee the contract.
    pub(crate) fn logical(op: Operator, operands: Vec<Self>) -> Self {
        debug_assert!(op.is_logical() && op.arity().accepts(operands.len()));

        Self::Call(Arc::new(Call { op, operands }))
    }

    /// Dispatch to the matching visitor method.
    pub fn accept<V: ExpressionVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Attribute(attribute) => visitor.visit_attribute(attribute),
            Self::Literal(literal) => visitor.visit_literal(literal),
            Self::Call(call) => visitor.visit_call(call),
        }
    }
}

///
/// Literal
///
/// Non-null constant together with its semantic kind.
/// The only constructors reject `Value::Null` (including inside lists).
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Literal {
    value: Value,
    kind: ValueKind,
}

impl Literal {
    pub fn new(value: Value) -> Result<Self, LiteralError> {
        let Some(kind) = value.kind() else {
            return Err(LiteralError::Null);
        };
        if let Value::List(items) = &value
            && let Some(index) = items.iter().position(Value::contains_null)
        {
            return Err(LiteralError::NullElement { index });
        }

        Ok(Self { value, kind })
    }

    /// Boolean constant; never null, so infallible.
    #[must_use]
    pub const fn bool(value: bool) -> Self {
        Self {
            value: Value::Bool(value),
            kind: ValueKind::Bool,
        }
    }

    /// Lift a typed value.
    pub fn of<V: FieldValue>(value: &V) -> Result<Self, LiteralError> {
        Self::new(value.to_value())
    }

    /// Lift a sequence of typed values into one list literal, order preserved.
    pub fn list<V, I>(values: I) -> Result<Self, LiteralError>
    where
        V: FieldValue,
        I: IntoIterator<Item = V>,
    {
        Self::new(Value::List(
            values.into_iter().map(|v| v.to_value()).collect(),
        ))
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }
}

impl TryFrom<Value> for Literal {
    type Error = LiteralError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        literal.value
    }
}

///
/// Call
///
/// Operator applied to an ordered operand list.
/// For attribute predicates the first operand is always the attribute.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Call {
    op: Operator,
    operands: Vec<Expression>,
}

impl Call {
    #[must_use]
    pub const fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }
}

// Deserialized calls go back through the registry checks.
impl<'de> Deserialize<'de> for Call {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawCall {
            op: Operator,
            operands: Vec<Expression>,
        }

        let raw = RawCall::deserialize(deserializer)?;
        match Expression::call(raw.op, raw.operands).map_err(serde::de::Error::custom)? {
            Expression::Call(call) => Ok(Arc::unwrap_or_clone(call)),
            _ => Err(serde::de::Error::custom("registry returned a non-call node")),
        }
    }
}

// ----------------------------------------------------------------------
// Internal helpers (not public API)
// ----------------------------------------------------------------------

fn mismatch(op: Operator, expected: ValueKind, found: ValueKind) -> CriteriaError {
    CriteriaError::TypeMismatch {
        operator: op,
        expected,
        found,
    }
}

fn require_kind(op: Operator, expected: ValueKind, found: ValueKind) -> Result<(), CriteriaError> {
    if expected == found {
        Ok(())
    } else {
        Err(mismatch(op, expected, found))
    }
}

// Arity has already been checked, so indexing is in bounds.
fn check_operand_kinds(op: Operator, operands: &[Expression]) -> Result<(), CriteriaError> {
    match op {
        Operator::Equal
        | Operator::NotEqual
        | Operator::LessThan
        | Operator::LessThanOrEqual
        | Operator::GreaterThan
        | Operator::GreaterThanOrEqual => {
            require_kind(op, operands[0].kind(), operands[1].kind())
        }
        Operator::In | Operator::NotIn => {
            let element = operands[0].kind();
            let list = &operands[1];
            require_kind(op, ValueKind::List, list.kind())?;

            if let Expression::Literal(literal) = list
                && let Some(items) = literal.value().as_list()
            {
                for item in items {
                    // literal construction already rejected nulls
                    if let Some(kind) = item.kind() {
                        require_kind(op, element, kind)?;
                    }
                }
            }

            Ok(())
        }
        Operator::StartsWith | Operator::EndsWith => {
            require_kind(op, ValueKind::Text, operands[0].kind())?;
            require_kind(op, ValueKind::Text, operands[1].kind())
        }
        Operator::Contains => match operands[0].kind() {
            ValueKind::Text => require_kind(op, ValueKind::Text, operands[1].kind()),
            ValueKind::List => Ok(()),
            other => Err(mismatch(op, ValueKind::List, other)),
        },
        Operator::HasSize => {
            require_kind(op, ValueKind::List, operands[0].kind())?;
            require_kind(op, ValueKind::Uint, operands[1].kind())
        }
        Operator::IsEmpty | Operator::IsNotEmpty => match operands[0].kind() {
            ValueKind::Text | ValueKind::List => Ok(()),
            other => Err(mismatch(op, ValueKind::List, other)),
        },
        Operator::IsPresent | Operator::IsAbsent => Ok(()),
        Operator::And | Operator::Or | Operator::Not => operands
            .iter()
            .try_for_each(|operand| require_kind(op, ValueKind::Bool, operand.kind())),
    }
}
