use crate::expr::{AttributeRef, Call, Literal};

///
/// ExpressionVisitor
///
/// Entry point for translators and evaluators. Call nodes are not walked
/// automatically; implementations recurse through `Call::operands` when they
/// need to.
///

pub trait ExpressionVisitor {
    type Output;

    fn visit_attribute(&mut self, attribute: &AttributeRef) -> Self::Output;

    fn visit_literal(&mut self, literal: &Literal) -> Self::Output;

    fn visit_call(&mut self, call: &Call) -> Self::Output;
}
