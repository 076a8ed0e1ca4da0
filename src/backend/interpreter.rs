use tracing::{trace, warn};

use crate::frontend::{ast::ASTExpr, lexer::Ops};

pub trait Evaluate {
    fn evaluate(&self) -> f64;
}

impl Ops {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Ops::Add => left + right,
            Ops::Sub => left - right,
            Ops::Mul => left * right,
            // IEEE-754: x/0 is +-inf and 0/0 is NaN, not an error
            Ops::Div => left / right,
        }
    }
}

impl Evaluate for ASTExpr {
    fn evaluate(&self) -> f64 {
        match self {
            ASTExpr::Literal { value, .. } => *value,

            ASTExpr::BinaryExpr { op, left, right } => {
                let lhs = left.evaluate();
                let rhs = right.evaluate();

                if *op == Ops::Div && rhs == 0.0 {
                    warn!(numerator = lhs, "division by zero");
                }

                let value = op.apply(lhs, rhs);
                trace!(%op, lhs, rhs, value, "evaluated binary expression");
                value
            }
        }
    }
}
