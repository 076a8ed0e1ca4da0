use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::{cli::Report, repl::evaluate_line};

/// Evaluate every line of `path` on its own, returning how many failed.
pub fn run_file(path: &Path, report: Report) -> Result<usize, Box<dyn Error>> {
    let src_code = fs::read_to_string(path)?;
    let source_name = path.display().to_string();

    let failures = run_script(
        &src_code,
        &source_name,
        report,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    Ok(failures)
}

pub fn run_script(
    src_code: &str,
    source_name: &str,
    report: Report,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<usize> {
    let mut failures = 0;

    for (index, line) in src_code.lines().enumerate() {
        match evaluate_line(source_name, line) {
            Ok(Some(line_report)) => report.write(&line_report, out)?,
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                writeln!(err, "{}:{}: error: {}", source_name, index + 1, e)?;
            }
        }
    }

    info!(source_name, failures, "finished script");

    Ok(failures)
}
