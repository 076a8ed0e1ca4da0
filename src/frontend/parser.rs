use std::collections::HashMap;
use std::iter::Peekable;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;

use crate::frontend::{
    ast::ASTExpr,
    lexer::{Ops, Token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Additive,
    Multiplicative,
}

// Which grammar level each operator belongs to. Looked up while climbing
// instead of hard-coding token kinds into every rule.
static OP_PRECEDENCE: Lazy<HashMap<Ops, Precedence>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(Ops::Add, Precedence::Additive);
    map.insert(Ops::Sub, Precedence::Additive);
    map.insert(Ops::Mul, Precedence::Multiplicative);
    map.insert(Ops::Div, Precedence::Multiplicative);
    map
});

#[derive(Error, PartialEq, Debug)]
pub enum ParserError {
    #[error("nothing to parse")]
    EmptyInput,

    #[error("unexpected token {0}")]
    UnexpectedToken(Token),

    #[error("reached end of input expecting a number")]
    UnexpectedEOI,

    #[error("unexpected token {0} after complete expression")]
    TrailingTokens(Token),
}

type ExprParseResult = Result<Box<ASTExpr>, ParserError>;

/// Parse one line worth of tokens into a single expression.
///
/// Every token has to be used up: a third operand (`1+2+3`) or a
/// parenthesis is reported as trailing input rather than dropped.
pub fn parse(tokens: &[Token]) -> ExprParseResult {
    let mut tokens = tokens.iter().copied().peekable();

    if tokens.peek().is_none() {
        return Err(ParserError::EmptyInput);
    }

    let expr = parse_expression(&mut tokens)?;

    match tokens.next() {
        Some(extra) => Err(ParserError::TrailingTokens(extra)),
        None => {
            debug!(tree = %expr, "parsed expression");
            Ok(expr)
        }
    }
}

/// expression ::= term ( ('+' | '-') term )?
fn parse_expression(tokens: &mut Peekable<impl Iterator<Item = Token>>) -> ExprParseResult {
    parse_level(tokens, Precedence::Additive)
}

/// term ::= factor ( ('*' | '/') factor )?
fn parse_term(tokens: &mut Peekable<impl Iterator<Item = Token>>) -> ExprParseResult {
    parse_level(tokens, Precedence::Multiplicative)
}

/// factor ::= INT | FLOAT
fn parse_factor(tokens: &mut Peekable<impl Iterator<Item = Token>>) -> ExprParseResult {
    match tokens.next() {
        Some(token) => ASTExpr::literal(token).ok_or(ParserError::UnexpectedToken(token)),
        None => Err(ParserError::UnexpectedEOI),
    }
}

fn parse_operand(
    tokens: &mut Peekable<impl Iterator<Item = Token>>,
    level: Precedence,
) -> ExprParseResult {
    match level {
        Precedence::Additive => parse_term(tokens),
        Precedence::Multiplicative => parse_factor(tokens),
    }
}

// One optional operator per level, so there is no loop here: `1+2+3`
// stops after `1+2` and leaves the rest to the caller.
fn parse_level(
    tokens: &mut Peekable<impl Iterator<Item = Token>>,
    level: Precedence,
) -> ExprParseResult {
    let lhs = parse_operand(tokens, level)?;

    let op = tokens
        .peek()
        .and_then(|token| token.operator())
        .filter(|op| OP_PRECEDENCE.get(op) == Some(&level));

    let Some(op) = op else {
        return Ok(lhs);
    };

    // swallow the operator
    let _operator = tokens.next();
    let rhs = parse_operand(tokens, level)?;

    Ok(ASTExpr::binary(op, lhs, rhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::tokenize;
    use Token::*;

    fn parse_str(input: &str) -> ExprParseResult {
        parse(&tokenize("test", input).unwrap())
    }

    fn lit(token: Token) -> Box<ASTExpr> {
        ASTExpr::literal(token).unwrap()
    }

    #[test]
    fn parsing_bare_literals() {
        assert_eq!(parse_str("42").unwrap(), lit(Int(42)));
        assert_eq!(parse_str(" 2.5 ").unwrap(), lit(Float(2.5)));
        assert_eq!(parse_str("42").unwrap().to_string(), "INT:42");
        assert_eq!(parse_str("2.5").unwrap().to_string(), "FLOAT:2.500");
    }

    #[test]
    fn parsing_single_operators() {
        assert_eq!(
            parse_str("1-2").unwrap(),
            ASTExpr::binary(Ops::Sub, lit(Int(1)), lit(Int(2)))
        );
        assert_eq!(
            parse_str("8 / 4.0").unwrap(),
            ASTExpr::binary(Ops::Div, lit(Int(8)), lit(Float(4.0)))
        );
    }

    #[test]
    fn multiplicative_binds_tighter() {
        let tree = parse_str("2*3+4").unwrap();

        assert_eq!(
            tree,
            ASTExpr::binary(
                Ops::Add,
                ASTExpr::binary(Ops::Mul, lit(Int(2)), lit(Int(3))),
                lit(Int(4))
            )
        );
        assert_eq!(tree.to_string(), "((INT:2,MUL,INT:3),PLUS,INT:4)");

        assert_eq!(
            parse_str("2+3*4").unwrap().to_string(),
            "(INT:2,PLUS,(INT:3,MUL,INT:4))"
        );
        assert_eq!(
            parse_str("1.5*2-6/3").unwrap().to_string(),
            "((FLOAT:1.500,MUL,INT:2),MINUS,(INT:6,DIV,INT:3))"
        );
    }

    #[test]
    fn one_operator_per_level() {
        assert_eq!(parse_str("1+2+3"), Err(ParserError::TrailingTokens(Plus)));
        assert_eq!(parse_str("2*3*4"), Err(ParserError::TrailingTokens(Mul)));
        assert_eq!(parse_str("1 2"), Err(ParserError::TrailingTokens(Int(2))));
    }

    #[test]
    fn parens_are_not_grammar() {
        assert_eq!(parse_str("(1)"), Err(ParserError::UnexpectedToken(LeftParen)));
        assert_eq!(parse_str("1)"), Err(ParserError::TrailingTokens(RightParen)));
    }

    #[test]
    fn incomplete_expressions() {
        assert_eq!(parse(&[]), Err(ParserError::EmptyInput));
        assert_eq!(parse_str("1+"), Err(ParserError::UnexpectedEOI));
        assert_eq!(parse_str("3*"), Err(ParserError::UnexpectedEOI));
        assert_eq!(parse_str("+1"), Err(ParserError::UnexpectedToken(Plus)));
        assert_eq!(parse_str("1*-2"), Err(ParserError::UnexpectedToken(Minus)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(ParserError::EmptyInput.to_string(), "nothing to parse");
        assert_eq!(
            parse_str("1+").unwrap_err().to_string(),
            "reached end of input expecting a number"
        );
        assert_eq!(
            parse_str("(1)").unwrap_err().to_string(),
            "unexpected token LP"
        );
        assert_eq!(
            parse_str("1+2+3").unwrap_err().to_string(),
            "unexpected token PLUS after complete expression"
        );
    }
}
