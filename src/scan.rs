//! Discovery and per-file inspection of set documents.
//!
//! The scanner walks a single directory (no recursion), picks up every
//! `*.json` entry except the generated `index.json`, and turns each one into a
//! [`SetReport`]. Read, parse, and structural failures stay local to the file
//! that caused them: they become an invalid report and scanning moves on.

use crate::validate::validate_set;
use crate::{EXPORTED_AT_FALLBACK, INDEX_FILE_NAME, UNKNOWN_NAME, display_value};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a scan of the sets directory turned up before any file was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Missing,
    Empty,
    /// Candidate files sorted by file name.
    Found(Vec<PathBuf>),
}

/// Why a set failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    /// The file could not be read as UTF-8 text.
    Unreadable,
    /// The contents are not syntactically valid JSON.
    MalformedJson,
    /// Valid JSON that does not have the set structure.
    Structure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    Valid {
        card_count: usize,
        exported_at: Value,
    },
    Invalid {
        defect: Defect,
        errors: Vec<String>,
    },
}

/// Result of inspecting one candidate file.
#[derive(Debug, Clone, PartialEq)]
pub struct SetReport {
    pub file: String,
    pub name: String,
    pub outcome: SetOutcome,
}

impl SetReport {
    fn invalid(file: String, name: String, defect: Defect, errors: Vec<String>) -> Self {
        Self {
            file,
            name,
            outcome: SetOutcome::Invalid { defect, errors },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, SetOutcome::Valid { .. })
    }

    pub fn card_count(&self) -> Option<usize> {
        match &self.outcome {
            SetOutcome::Valid { card_count, .. } => Some(*card_count),
            SetOutcome::Invalid { .. } => None,
        }
    }

    pub fn exported_at(&self) -> Option<&Value> {
        match &self.outcome {
            SetOutcome::Valid { exported_at, .. } => Some(exported_at),
            SetOutcome::Invalid { .. } => None,
        }
    }

    /// Error messages; empty for valid sets.
    pub fn errors(&self) -> &[String] {
        match &self.outcome {
            SetOutcome::Valid { .. } => &[],
            SetOutcome::Invalid { errors, .. } => errors.as_slice(),
        }
    }
}

#[derive(Serialize)]
struct SetReportRecord<'a> {
    file: &'a str,
    name: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [String]>,
}

impl Serialize for SetReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let errors = match &self.outcome {
            SetOutcome::Invalid { errors, .. } => Some(errors.as_slice()),
            SetOutcome::Valid { .. } => None,
        };
        SetReportRecord {
            file: &self.file,
            name: &self.name,
            valid: self.is_valid(),
            card_count: self.card_count(),
            exported_at: self.exported_at(),
            errors,
        }
        .serialize(serializer)
    }
}

/// List candidate set files in `dir`.
///
/// Matches entries whose name ends in `.json` (case-sensitive) and skips
/// `index.json`. A path that exists but is not a directory yields
/// [`Discovery::Empty`].
pub fn discover_set_files(dir: &Path) -> Result<Discovery> {
    if !dir.exists() {
        return Ok(Discovery::Missing);
    }
    if !dir.is_dir() {
        return Ok(Discovery::Empty);
    }

    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("listing entries in {}", dir.display()))?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.ends_with(".json") && file_name != INDEX_FILE_NAME {
            files.push(entry.path());
        }
    }

    if files.is_empty() {
        return Ok(Discovery::Empty);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(Discovery::Found(files))
}

/// Read, parse, and validate a single candidate file.
pub fn inspect_set_file(path: &Path) -> SetReport {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            return SetReport::invalid(
                file,
                UNKNOWN_NAME.to_string(),
                Defect::Unreadable,
                vec![err.to_string()],
            );
        }
    };

    let document = match parse_document(&raw) {
        Ok(document) => document,
        Err(err) => {
            return SetReport::invalid(
                file,
                UNKNOWN_NAME.to_string(),
                Defect::MalformedJson,
                vec![format!("JSON decode error: {err}")],
            );
        }
    };

    report_for_document(file, &document)
}

/// Parse without serde_json's nesting limit or its f64 number range, so any
/// document a general JSON reader accepts gets as far as validation.
pub fn parse_document(raw: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    deserializer.disable_recursion_limit();
    let document = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(document)
}

/// Build the report for an already-parsed document.
pub fn report_for_document(file: String, document: &Value) -> SetReport {
    let validation = validate_set(document);
    let name = document
        .get("name")
        .map(display_value)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    if !validation.is_valid() {
        return SetReport::invalid(file, name, Defect::Structure, validation.into_errors());
    }

    let card_count = document
        .get("cards")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    let exported_at = document
        .get("exportedAt")
        .cloned()
        .unwrap_or_else(|| Value::String(EXPORTED_AT_FALLBACK.to_string()));

    SetReport {
        file,
        name,
        outcome: SetOutcome::Valid {
            card_count,
            exported_at,
        },
    }
}

/// Scan `dir`, writing progress lines to `out`.
///
/// Returns an empty list when the directory is missing, unreadable, or holds
/// no candidates. The only error is a failure to write to `out`.
pub fn scan_sets<W: Write>(dir: &Path, out: &mut W) -> Result<Vec<SetReport>> {
    let files = match discover_set_files(dir) {
        Ok(Discovery::Found(files)) => files,
        Ok(Discovery::Missing) => {
            writeln!(out, "❌ Bundled directory '{}' does not exist", dir.display())?;
            return Ok(Vec::new());
        }
        Ok(Discovery::Empty) => {
            writeln!(out, "⚠️  No JSON files found in '{}' directory", dir.display())?;
            return Ok(Vec::new());
        }
        Err(err) => {
            writeln!(out, "❌ Unable to scan '{}': {err:#}", dir.display())?;
            return Ok(Vec::new());
        }
    };

    writeln!(
        out,
        "📁 Found {} JSON file(s) in '{}' directory\n",
        files.len(),
        dir.display()
    )?;

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let report = inspect_set_file(path);
        write_analysis(out, &report)?;
        reports.push(report);
    }
    Ok(reports)
}

fn write_analysis<W: Write>(out: &mut W, report: &SetReport) -> Result<()> {
    writeln!(out, "📄 Analyzing: {}", report.file)?;
    match &report.outcome {
        SetOutcome::Valid {
            card_count,
            exported_at,
        } => {
            writeln!(out, "   ✅ Valid set: '{}'", report.name)?;
            writeln!(out, "      Cards: {card_count}")?;
            writeln!(out, "      Exported: {}", display_value(exported_at))?;
        }
        SetOutcome::Invalid { defect, errors } => match defect {
            Defect::Structure => {
                writeln!(out, "   ❌ Invalid set structure:")?;
                for error in errors {
                    writeln!(out, "      - {error}")?;
                }
            }
            Defect::MalformedJson => {
                writeln!(out, "   ❌ Invalid JSON: {}", errors.join("; "))?;
            }
            Defect::Unreadable => {
                writeln!(out, "   ❌ Error reading file: {}", errors.join("; "))?;
            }
        },
    }
    writeln!(out)?;
    Ok(())
}
