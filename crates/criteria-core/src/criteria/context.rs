use crate::{
    error::{CriteriaError, LiteralError},
    expr::{AttributeRef, Expression, Literal, Operator, Path},
    traits::FieldValue,
    value::ValueKind,
};
use std::{fmt, sync::Arc};
use tracing::{debug, trace};

///
/// CriteriaCreator
///
/// Continuation that turns a folded context into the next result value.
/// Must be side-effect free; it is invoked once per operator call.
///

pub trait CriteriaCreator<R>: Send + Sync {
    fn create(&self, context: CriteriaContext<R>) -> R;
}

impl<R, F> CriteriaCreator<R> for F
where
    F: Fn(CriteriaContext<R>) -> R + Send + Sync,
{
    fn create(&self, context: CriteriaContext<R>) -> R {
        self(context)
    }
}

///
/// CriteriaContext
///
/// Carries the bound attribute, the tree accumulated so far and the
/// continuation. Never mutated: every fold derives a new context, so a
/// builder can be reused and shared across threads.
///

pub struct CriteriaContext<R> {
    attribute: Option<AttributeRef>,
    expression: Dnf,
    creator: Arc<dyn CriteriaCreator<R>>,
}

impl<R> CriteriaContext<R> {
    /// Root context: no attribute bound, nothing accumulated.
    pub fn new(creator: impl CriteriaCreator<R> + 'static) -> Self {
        Self {
            attribute: None,
            expression: Dnf::default(),
            creator: Arc::new(creator),
        }
    }

    /// Same tree and continuation, bound to `attribute`.
    #[must_use]
    pub fn with_attribute(&self, attribute: AttributeRef) -> Self {
        Self {
            attribute: Some(attribute),
            expression: self.expression.clone(),
            creator: Arc::clone(&self.creator),
        }
    }

    /// Bind an attribute whose declared kind is that of `V`.
    #[must_use]
    pub fn bind<V: FieldValue>(&self, path: impl Into<Path>) -> Self {
        self.with_attribute(AttributeRef::new(path, V::KIND))
    }

    /// Bind a nested attribute below the current one (or at the root).
    #[must_use]
    pub fn child(&self, name: impl Into<String>, kind: ValueKind) -> Self {
        let path = match &self.attribute {
            Some(attribute) => attribute.path.child(name),
            None => Path::new(name),
        };

        self.with_attribute(AttributeRef::new(path, kind))
    }

    #[must_use]
    pub const fn attribute(&self) -> Option<&AttributeRef> {
        self.attribute.as_ref()
    }

    /// Start a new disjunct: the next fold is OR-ed with everything so far.
    #[must_use]
    pub fn or(&self) -> Self {
        Self {
            attribute: self.attribute.clone(),
            expression: self.expression.or(),
            creator: Arc::clone(&self.creator),
        }
    }

    /// Tree accumulated so far, `None` before the first fold.
    #[must_use]
    pub fn expression(&self) -> Option<Expression> {
        self.expression.to_expression()
    }

    // ------------------------------------------------------------------
    // Node construction
    // ------------------------------------------------------------------

    /// Build `op(attribute, literal(value))` without folding it.
    pub fn apply<V: FieldValue>(
        &self,
        op: Operator,
        value: &V,
    ) -> Result<Expression, CriteriaError> {
        let attribute = self.attribute_expression(op)?;
        let literal = self.lift(op, Literal::of(value))?;

        Expression::binary(op, attribute, literal)
    }

    /// Build `op(attribute, [values..])` without folding it.
    pub fn apply_list<V, I>(&self, op: Operator, values: I) -> Result<Expression, CriteriaError>
    where
        V: FieldValue,
        I: IntoIterator<Item = V>,
    {
        let attribute = self.attribute_expression(op)?;
        let literal = self.lift(op, Literal::list(values))?;

        Expression::binary(op, attribute, literal)
    }

    /// Build `op(attribute)` without folding it.
    pub fn apply_unary(&self, op: Operator) -> Result<Expression, CriteriaError> {
        let attribute = self.attribute_expression(op)?;

        Expression::unary(op, attribute)
    }

    pub fn create<V: FieldValue>(&self, op: Operator, value: &V) -> Result<R, CriteriaError> {
        let node = self.apply(op, value)?;

        Ok(self.fold(node))
    }

    pub fn create_list<V, I>(&self, op: Operator, values: I) -> Result<R, CriteriaError>
    where
        V: FieldValue,
        I: IntoIterator<Item = V>,
    {
        let node = self.apply_list(op, values)?;

        Ok(self.fold(node))
    }

    pub fn create_unary(&self, op: Operator) -> Result<R, CriteriaError> {
        let node = self.apply_unary(op)?;

        Ok(self.fold(node))
    }

    /// AND `node` into the current disjunct and hand the new context to the
    /// continuation.
    pub fn fold(&self, node: Expression) -> R {
        trace!(
            attribute = %self.attribute_label(),
            node = %node,
            "folding criteria node"
        );

        let next = Self {
            attribute: self.attribute.clone(),
            expression: self.expression.and(node),
            creator: Arc::clone(&self.creator),
        };

        self.creator.create(next)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn attribute_expression(&self, op: Operator) -> Result<Expression, CriteriaError> {
        self.attribute
            .clone()
            .map(Expression::attribute)
            .ok_or_else(|| {
                CriteriaError::invariant(format!("{op} requested on a context with no attribute"))
            })
    }

    fn lift(
        &self,
        op: Operator,
        literal: Result<Literal, LiteralError>,
    ) -> Result<Expression, CriteriaError> {
        literal.map(Expression::literal).map_err(|source| {
            debug!(
                attribute = %self.attribute_label(),
                operator = %op,
                error = %source,
                "rejected criteria literal"
            );

            CriteriaError::InvalidArgument {
                attribute: self.attribute_label(),
                operator: op,
                source,
            }
        })
    }

    fn attribute_label(&self) -> String {
        self.attribute
            .as_ref()
            .map_or_else(|| "<root>".to_string(), |attribute| attribute.path.to_string())
    }
}

impl<R> Clone for CriteriaContext<R> {
    fn clone(&self) -> Self {
        Self {
            attribute: self.attribute.clone(),
            expression: self.expression.clone(),
            creator: Arc::clone(&self.creator),
        }
    }
}

impl<R> fmt::Debug for CriteriaContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaContext")
            .field("attribute", &self.attribute)
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

///
/// Dnf
///
/// Accumulated tree in disjunctive normal form: an OR of AND-groups, each in
/// call order. A single node is materialized as itself, never wrapped.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Dnf {
    groups: Vec<Vec<Expression>>,
    pending_or: bool,
}

impl Dnf {
    pub(crate) fn and(&self, node: Expression) -> Self {
        let mut groups = self.groups.clone();
        if self.pending_or || groups.is_empty() {
            groups.push(vec![node]);
        } else if let Some(group) = groups.last_mut() {
            group.push(node);
        }

        Self {
            groups,
            pending_or: false,
        }
    }

    pub(crate) fn or(&self) -> Self {
        Self {
            groups: self.groups.clone(),
            pending_or: !self.groups.is_empty(),
        }
    }

    pub(crate) fn to_expression(&self) -> Option<Expression> {
        let mut disjuncts: Vec<Expression> = self
            .groups
            .iter()
            .map(|group| match group.as_slice() {
                [single] => single.clone(),
                _ => Expression::logical(Operator::And, group.clone()),
            })
            .collect();

        match disjuncts.len() {
            0 => None,
            1 => disjuncts.pop(),
            _ => Some(Expression::logical(Operator::Or, disjuncts)),
        }
    }
}
