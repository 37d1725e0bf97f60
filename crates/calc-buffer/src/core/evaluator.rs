//! AST evaluator
//!
//! Intermediate values follow IEEE-754 rules untouched; only the final value
//! has to be finite. `1/(1/0)` therefore evaluates to `0` while `5/0` fails.

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult};

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node to a raw `f64`, which may be non-finite
    #[must_use]
    pub fn evaluate_raw(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate_raw(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate_raw(left), self.evaluate_raw(right))
            }
        }
    }

    /// Evaluates an AST node, rejecting infinite and NaN results
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        let value = self.evaluate_raw(node);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite(value))
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}
