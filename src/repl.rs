use std::fmt;
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::{
    backend::interpreter::Evaluate,
    cli::{Cli, Report},
    frontend::{
        ast::ASTExpr,
        lexer::{render_tokens, Lex, LexError, Token},
        parser::{parse, ParserError},
    },
};

// Anything that can go wrong with one line. The line is dropped, the
// session carries on.
#[derive(Error, Debug, PartialEq)]
pub enum LineError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParserError),
}

#[derive(Debug, PartialEq)]
pub struct LineReport {
    pub tokens: Vec<Token>,
    pub tree: Box<ASTExpr>,
    pub value: f64,
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tree)?;
        writeln!(f, "{}", render_tokens(&self.tokens))?;
        write!(f, "{}", self.value)
    }
}

/// Run one line through lexer, parser and evaluator.
///
/// Blank lines produce `Ok(None)`.
pub fn evaluate_line(source_name: &str, line: &str) -> Result<Option<LineReport>, LineError> {
    let tokens = line.lex(source_name)?;

    if tokens.is_empty() {
        return Ok(None);
    }

    let tree = parse(&tokens)?;
    let value = tree.evaluate();

    debug!(source_name, value, "evaluated line");

    Ok(Some(LineReport {
        tokens,
        tree,
        value,
    }))
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub source_name: String,
    pub prompt: String,
    pub report: Report,
}

impl From<&Cli> for SessionOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            source_name: cli.source_name.clone(),
            prompt: cli.prompt.clone(),
            report: cli.report,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            source_name: "stdin".into(),
            prompt: "Basic > ".into(),
            report: Report::Full,
        }
    }
}

/// Read-eval-print until `input` runs dry.
pub fn run_session(
    mut input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
    options: &SessionOptions,
) -> io::Result<()> {
    let mut input_buf = String::new();

    loop {
        write!(out, "{}", options.prompt)?;
        out.flush()?;

        input_buf.clear();
        if input.read_line(&mut input_buf)? == 0 {
            // leave the terminal on a fresh line
            writeln!(out)?;
            return Ok(());
        }

        let line = input_buf.trim_end_matches(&['\n', '\r'][..]);

        match evaluate_line(&options.source_name, line) {
            Ok(Some(report)) => options.report.write(&report, &mut out)?,
            Ok(None) => continue,
            Err(e) => writeln!(err, "error: {e}")?,
        }
    }
}

pub fn run(options: &SessionOptions) -> io::Result<()> {
    run_session(io::stdin().lock(), io::stdout(), io::stderr(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use Token::*;

    fn session(input: &str, options: &SessionOptions) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();

        run_session(Cursor::new(input), &mut out, &mut err, options).unwrap();

        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn evaluating_a_line() {
        let report = evaluate_line("stdin", "2*3+4").unwrap().unwrap();

        assert_eq!(report.tokens, vec![Int(2), Mul, Int(3), Plus, Int(4)]);
        assert_eq!(report.value, 10.0);
        assert_eq!(
            report.to_string(),
            "((INT:2,MUL,INT:3),PLUS,INT:4)\nINT:2 MUL INT:3 PLUS INT:4\n10"
        );
    }

    #[test]
    fn values_use_rust_float_display() {
        let value_line = |input: &str| {
            let report = evaluate_line("stdin", input).unwrap().unwrap();
            report.to_string().lines().last().unwrap().to_owned()
        };

        assert_eq!(value_line("5/0"), "inf");
        assert_eq!(value_line("0/0"), "NaN");
        assert_eq!(value_line("100000*100000"), "10000000000");
        assert_eq!(value_line("1/4"), "0.25");
    }

    #[test]
    fn blank_lines_produce_nothing() {
        assert_eq!(evaluate_line("stdin", ""), Ok(None));
        assert_eq!(evaluate_line("stdin", "  \t"), Ok(None));
    }

    #[test]
    fn line_errors() {
        assert!(matches!(
            evaluate_line("stdin", "1+$2"),
            Err(LineError::Lex(LexError::UnexpectedCharacter { column: 2, .. }))
        ));
        assert_eq!(
            evaluate_line("stdin", "1+2+3"),
            Err(LineError::Parse(ParserError::TrailingTokens(Plus)))
        );
    }

    #[test]
    fn session_prints_tree_tokens_and_value() {
        let (out, err) = session("3.5*2\n", &SessionOptions::default());

        assert_eq!(
            out,
            "Basic > (FLOAT:3.500,MUL,INT:2)\nFLOAT:3.500 MUL INT:2\n7\nBasic > \n"
        );
        assert_eq!(err, "");
    }

    #[test]
    fn session_recovers_from_bad_lines() {
        let options = SessionOptions {
            report: Report::Value,
            ..SessionOptions::default()
        };
        let (out, err) = session("1+$2\r\n\n5/0\n8-2.5", &options);

        assert_eq!(out, "Basic > Basic > Basic > inf\nBasic > 5.5\nBasic > \n");
        assert_eq!(
            err,
            "error: unexpected character '$' in stdin at line 0, column 2\n"
        );
    }

    #[test]
    fn session_uses_configured_names() {
        let options = SessionOptions {
            source_name: "tty".into(),
            prompt: "> ".into(),
            report: Report::Value,
        };
        let (out, err) = session("2 # 2\n", &options);

        assert_eq!(out, "> > \n");
        assert_eq!(
            err,
            "error: unexpected character '#' in tty at line 0, column 2\n"
        );
    }
}
