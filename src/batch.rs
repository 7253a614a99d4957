//! Non-interactive mode: commit cells, evaluate a formula, print the sheet.

use anyhow::{Context, Result, bail};
use std::io::Write;
use zingsheet_core::export::{write_entries, write_markdown};
use zingsheet_core::Document;
use zingsheet_engine::engine::CellRef;

/// One `--set CELL=TEXT` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub cell: CellRef,
    pub input: String,
}

/// Parse `CELL=TEXT`. Only the first `=` separates, so `C1==A1+B1` commits
/// the formula `=A1+B1`.
pub fn parse_assignment(arg: &str) -> std::result::Result<Assignment, String> {
    let (name, input) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected CELL=TEXT, got '{}'", arg))?;
    let cell = name.trim().parse::<CellRef>()?;
    Ok(Assignment {
        cell,
        input: input.to_string(),
    })
}

pub struct BatchRequest<'a> {
    pub assignments: &'a [Assignment],
    pub command: Option<&'a str>,
    pub print: bool,
    pub dump: bool,
}

/// Run a batch request. Returns the process exit code.
pub fn run<W: Write>(doc: &mut Document, request: &BatchRequest<'_>, out: &mut W) -> Result<i32> {
    for assignment in request.assignments {
        doc.commit(assignment.cell.clone(), &assignment.input)
            .with_context(|| format!("failed to set {}", assignment.cell))?;
    }

    let mut exit_code = 0;
    if let Some(command) = request.command {
        let formula = if command.starts_with('=') {
            command.to_string()
        } else {
            format!("={}", command)
        };
        let value = doc.preview(&CellRef::new(0, 0), &formula);
        writeln!(out, "{}", value)?;
        if value.is_error() {
            exit_code = 1;
        }
    }

    if request.print {
        write_markdown(out, doc)?;
    }
    if request.dump {
        write_entries(out, doc)?;
    }

    if request.assignments.is_empty() && request.command.is_none() && !request.print && !request.dump
    {
        bail!("nothing to do");
    }
    Ok(exit_code)
}
