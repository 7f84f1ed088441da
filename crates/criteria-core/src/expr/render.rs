use crate::expr::{AttributeRef, Call, Expression, ExpressionVisitor, Literal, Operator};
use std::fmt::{self, Write as _};

///
/// Compact infix rendering
///
/// Diagnostic only; not a query language. Translators own their own syntax.
///

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(attribute) => write!(f, "{attribute}"),
            Self::Literal(literal) => write!(f, "{}", literal.value()),
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.op();
        let operands = self.operands();

        match op {
            Operator::And | Operator::Or => {
                f.write_str("(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.symbol())?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
            Operator::Not => write!(f, "NOT ({})", operands[0]),
            _ if operands.len() == 1 => write!(f, "{} {}", operands[0], op.symbol()),
            _ => write!(f, "{} {} {}", operands[0], op.symbol(), operands[1]),
        }
    }
}

///
/// DebugRenderer
///
/// Indented one-node-per-line dump of a tree, for logs and test failures.
///

#[derive(Clone, Debug)]
pub struct DebugRenderer {
    indent: usize,
    depth: usize,
    out: String,
}

impl Default for DebugRenderer {
    fn default() -> Self {
        Self::with_indent(2)
    }
}

impl DebugRenderer {
    #[must_use]
    pub const fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            depth: 0,
            out: String::new(),
        }
    }

    /// Render a whole tree and return the text.
    #[must_use]
    pub fn render(mut self, expression: &Expression) -> String {
        expression.accept(&mut self);
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let pad = self.indent * self.depth;
        // writing into a String cannot fail
        let _ = writeln!(self.out, "{:pad$}{args}", "");
    }
}

impl ExpressionVisitor for DebugRenderer {
    type Output = ();

    fn visit_attribute(&mut self, attribute: &AttributeRef) {
        self.line(format_args!("path={attribute}"));
    }

    fn visit_literal(&mut self, literal: &Literal) {
        self.line(format_args!("literal={}", literal.value()));
    }

    fn visit_call(&mut self, call: &Call) {
        self.line(format_args!("call op={}", call.op()));

        self.depth += 1;
        for operand in call.operands() {
            operand.accept(self);
        }
        self.depth -= 1;
    }
}
