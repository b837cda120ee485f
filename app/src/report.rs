//! FILENAME: app/src/report.rs
// PURPOSE: Turns a sheet file into rows, evaluates them, and renders the
// text, JSON and token reports.

use engine::{EvalResult, Sheet};
use parser::{describe_tokens, tokenize_detailed};
use serde::Serialize;

/// One evaluated row of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub row: usize,
    pub formula: String,
    /// `None` for an empty cell.
    pub result: Option<EvalResult>,
}

/// The formulas of a sheet file, one per row. Lines starting with `#` are
/// comments and do not take a row; blank lines are empty cells.
pub fn sheet_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Evaluates every row against the whole sheet.
pub fn evaluate_rows(lines: &[String]) -> Vec<ReportRow> {
    let mut sheet = Sheet::new();
    for line in lines {
        if line.is_empty() {
            sheet.push(None);
        } else {
            sheet.push_formula(line);
        }
    }
    log::info!(target: "APP", "evaluating {} rows", sheet.len());

    lines
        .iter()
        .zip(sheet.evaluate_all())
        .enumerate()
        .map(|(row, (formula, result))| ReportRow {
            row,
            formula: formula.clone(),
            result: (!formula.is_empty()).then_some(result),
        })
        .collect()
}

/// `A<row>\t<formula>\t<result>` per row.
pub fn render_text(rows: &[ReportRow]) -> String {
    rows.iter()
        .map(|r| {
            let result = r.result.as_ref().map(EvalResult::describe).unwrap_or_default();
            format!("A{}\t{}\t{}\n", r.row, r.formula, result)
        })
        .collect()
}

/// The token list of every non-empty row, or the reason it could not be
/// tokenized.
pub fn render_tokens(lines: &[String]) -> String {
    let mut out = String::new();
    for (row, formula) in lines.iter().enumerate() {
        if formula.is_empty() {
            continue;
        }
        out.push_str(&format!("A{}\t{}\n", row, formula));
        match tokenize_detailed(formula) {
            Ok(tokens) if tokens.is_empty() => {}
            Ok(tokens) => {
                out.push_str(&describe_tokens(&tokens));
                out.push('\n');
            }
            Err(e) => {
                log::warn!(target: "APP", "A{}: {}", row, e);
                out.push_str(&format!("{}\n", e));
            }
        }
    }
    out
}
