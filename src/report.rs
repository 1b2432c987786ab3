//! Human-readable run summary for `detect-sets`.

use crate::index::IndexOutcome;
use crate::scan::SetReport;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 60;

/// Counts over one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl Tally {
    pub fn of(reports: &[SetReport]) -> Self {
        let valid = reports.iter().filter(|report| report.is_valid()).count();
        Self {
            total: reports.len(),
            valid,
            invalid: reports.len() - valid,
        }
    }
}

pub fn write_rule<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

pub fn write_banner<W: Write>(out: &mut W) -> Result<()> {
    write_rule(out)?;
    writeln!(out, "🔍 Bundled Flashcard Sets Detector")?;
    write_rule(out)?;
    writeln!(out)?;
    Ok(())
}

/// Counts followed by one line per valid and per invalid set.
pub fn write_summary<W: Write>(out: &mut W, reports: &[SetReport]) -> Result<Tally> {
    let tally = Tally::of(reports);

    write_rule(out)?;
    writeln!(out, "📊 Summary")?;
    write_rule(out)?;
    writeln!(out, "Total sets found: {}", tally.total)?;
    writeln!(out, "  ✅ Valid: {}", tally.valid)?;
    writeln!(out, "  ❌ Invalid: {}", tally.invalid)?;

    if tally.valid > 0 {
        writeln!(out)?;
        writeln!(out, "Valid sets:")?;
        for report in reports.iter().filter(|report| report.is_valid()) {
            writeln!(
                out,
                "  - {}: {} ({} cards)",
                report.file,
                report.name,
                report.card_count().unwrap_or_default()
            )?;
        }
    }

    if tally.invalid > 0 {
        writeln!(out)?;
        writeln!(out, "Invalid sets:")?;
        for report in reports.iter().filter(|report| !report.is_valid()) {
            let errors = if report.errors().is_empty() {
                "Unknown error".to_string()
            } else {
                report.errors().join(", ")
            };
            writeln!(out, "  - {}: {errors}", report.file)?;
        }
    }

    Ok(tally)
}

/// Report what the index writer did, or why it failed.
pub fn write_index_outcome<W: Write>(
    out: &mut W,
    index_path: &Path,
    outcome: &Result<IndexOutcome>,
) -> Result<()> {
    match outcome {
        Ok(IndexOutcome::Written { path, count }) => {
            writeln!(out, "✅ Updated '{}' with {count} set(s)", path.display())?
        }
        Ok(IndexOutcome::NothingToIndex) => {
            writeln!(out, "⚠️  No valid sets to add to index.json")?
        }
        Err(err) => writeln!(
            out,
            "❌ Failed to update '{}': {err:#}",
            index_path.display()
        )?,
    }
    Ok(())
}
