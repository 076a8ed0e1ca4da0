use std::fmt;

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::frontend::position::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Plus,
    Minus,
    Mul,
    Div,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ops {
    Add,
    Sub,
    Mul,
    Div,
}

impl Token {
    fn from_single_char(c: char) -> Option<Self> {
        use Token::*;

        match c {
            '+' => Some(Plus),
            '-' => Some(Minus),
            '*' => Some(Mul),
            '/' => Some(Div),
            '(' => Some(LeftParen),
            ')' => Some(RightParen),

            _ => None,
        }
    }

    /// The binary operator this token stands for, if any.
    pub fn operator(self) -> Option<Ops> {
        match self {
            Token::Plus => Some(Ops::Add),
            Token::Minus => Some(Ops::Sub),
            Token::Mul => Some(Ops::Mul),
            Token::Div => Some(Ops::Div),

            _ => None,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Token::Int(_) => "INT",
            Token::Float(_) => "FLOAT",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Mul => "MUL",
            Token::Div => "DIV",
            Token::LeftParen => "LP",
            Token::RightParen => "RP",
        }
    }

    /// Text that lexes back into this token.
    pub fn lexeme(self) -> String {
        match self {
            Token::Int(n) => n.to_string(),
            // f64's Display never uses an exponent, but drops the point on
            // whole numbers, which would turn the literal into an INT.
            Token::Float(x) => {
                let text = x.to_string();
                if text.contains('.') {
                    text
                } else {
                    format!("{text}.0")
                }
            }
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Mul => "*".into(),
            Token::Div => "/".into(),
            Token::LeftParen => "(".into(),
            Token::RightParen => ")".into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}:{}", self.kind(), n),
            Token::Float(x) => write!(f, "{}:{:.3}", self.kind(), x),
            _ => f.write_str(self.kind()),
        }
    }
}

impl From<Ops> for Token {
    fn from(op: Ops) -> Self {
        match op {
            Ops::Add => Token::Plus,
            Ops::Sub => Token::Minus,
            Ops::Mul => Token::Mul,
            Ops::Div => Token::Div,
        }
    }
}

// Same names as the operator tokens, so trees and token lists agree.
impl fmt::Display for Ops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Token::from(*self).kind())
    }
}

// Lines and columns are zero-based, as tracked by `Position`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {ch:?} in {source_name} at line {line}, column {column}")]
    UnexpectedCharacter {
        source_name: String,
        line: usize,
        column: usize,
        ch: char,
    },

    #[error("invalid numeric literal {literal:?} in {source_name} at line {line}, column {column}")]
    InvalidLiteral {
        literal: String,
        source_name: String,
        line: usize,
        column: usize,
    },
}

pub struct Lexer<'src> {
    chars: Vec<char>,
    pos: Position<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source_name: &'src str, text: &'src str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: Position::new(source_name, text),
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos.index).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos.advance(c);
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current() {
            match c {
                ' ' | '\t' => self.advance(),

                // Number scanning leaves the cursor just past the literal
                '0'..='9' => tokens.push(self.scan_number()?),

                other => match Token::from_single_char(other) {
                    Some(token) => {
                        tokens.push(token);
                        self.advance();
                    }
                    None => {
                        return Err(LexError::UnexpectedCharacter {
                            source_name: self.pos.source_name.to_owned(),
                            line: self.pos.line,
                            column: self.pos.column,
                            ch: other,
                        })
                    }
                },
            }
        }

        debug!(
            source = self.pos.source_name,
            count = tokens.len(),
            "tokenized line"
        );

        Ok(tokens)
    }

    /// number ::= digit+ ( '.' digit* )?
    ///
    /// A second '.' ends the literal and is left for the main loop.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let mut literal = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.current() {
            match c {
                '0'..='9' => literal.push(c),
                '.' if !seen_dot => {
                    literal.push(c);
                    seen_dot = true;
                }
                _ => break,
            }
            self.advance();
        }

        let token = if seen_dot {
            literal
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Token::Float)
        } else {
            literal.parse::<i32>().ok().map(|n| Token::Int(n.into()))
        };

        token.ok_or_else(|| LexError::InvalidLiteral {
            literal,
            source_name: start.source_name.to_owned(),
            line: start.line,
            column: start.column,
        })
    }
}

pub fn tokenize(source_name: &str, text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source_name, text).tokenize()
}

pub trait Lex {
    fn lex(&self, source_name: &str) -> Result<Vec<Token>, LexError>;
}

impl Lex for str {
    fn lex(&self, source_name: &str) -> Result<Vec<Token>, LexError> {
        tokenize(source_name, self)
    }
}

/// `INT:12 PLUS FLOAT:3.500`
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}

/// `12 + 3.5`, lexable again.
pub fn render_source(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.lexeme()).join(" ")
}
