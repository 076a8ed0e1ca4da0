use std::fmt;

use crate::frontend::lexer::{Ops, Token};

// Enum dispatch over a closed set of nodes. Each node owns its children,
// so a tree is built bottom-up once and can't contain cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTExpr {
    /// `value` is the number widened to f64, `token` the literal it was read from.
    Literal { value: f64, token: Token },
    BinaryExpr {
        op: Ops,
        left: Box<ASTExpr>,
        right: Box<ASTExpr>,
    },
}

impl ASTExpr {
    /// A leaf for a number token, `None` for anything else.
    pub fn literal(token: Token) -> Option<Box<Self>> {
        let value = match token {
            Token::Int(n) => n as f64,
            Token::Float(x) => x,
            _ => return None,
        };

        Some(Box::new(ASTExpr::Literal { value, token }))
    }

    pub fn binary(op: Ops, left: Box<ASTExpr>, right: Box<ASTExpr>) -> Box<Self> {
        Box::new(ASTExpr::BinaryExpr { op, left, right })
    }
}

/// `((INT:2,MUL,INT:3),PLUS,FLOAT:4.500)`, or the bare literal token.
impl fmt::Display for ASTExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTExpr::Literal { token, .. } => write!(f, "{token}"),
            ASTExpr::BinaryExpr { op, left, right } => write!(f, "({left},{op},{right})"),
        }
    }
}
