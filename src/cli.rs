use std::io::{self, Write};
use std::path::PathBuf;

use clap::{
    builder::{OsStr, PossibleValue},
    ArgAction, Parser, ValueEnum,
};

use crate::repl::LineReport;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// A file with one arithmetic expression per line to evaluate, if not given, starts interpreter instead
    pub file: Option<PathBuf>,

    /// Source name used in diagnostics for interactive input
    #[arg(long, default_value = "stdin")]
    pub source_name: String,

    /// Prompt printed before every line read by the interpreter
    #[arg(long, default_value = "Basic > ")]
    pub prompt: String,

    /// What to print for every evaluated line
    #[arg(long, value_enum, default_value = Report::Full)]
    pub report: Report,

    /// Log more (-v for debug, -vv for trace), RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Report {
    Full,
    Value,
}

impl ValueEnum for Report {
    fn value_variants<'a>() -> &'a [Self] {
        &[Report::Full, Report::Value]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Report::Full => PossibleValue::new("full").help("Parse tree, tokens and value"),
            Report::Value => PossibleValue::new("value").help("Only the value"),
        })
    }
}

impl From<Report> for OsStr {
    fn from(report: Report) -> OsStr {
        match report {
            Report::Full => "full".into(),
            Report::Value => "value".into(),
        }
    }
}

impl Report {
    pub fn write(self, report: &LineReport, out: &mut impl Write) -> io::Result<()> {
        match self {
            Report::Full => writeln!(out, "{report}"),
            Report::Value => writeln!(out, "{}", report.value),
        }
    }
}

pub fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "calcrs=warn",
        1 => "calcrs=debug",
        _ => "calcrs=trace",
    }
}
