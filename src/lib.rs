//! Detects bundled flashcard sets, validates their structure, and maintains
//! the `index.json` manifest that lists the valid ones.
//!
//! The pipeline is `scan::scan_sets` → `report::write_summary` →
//! `index::write_index`, driven by the `detect-sets` binary. `set-validate`
//! exposes `validate::validate_set` for a single document.

pub mod index;
pub mod report;
pub mod scan;
pub mod validate;

pub use index::{
    IndexManifest, IndexOutcome, IndexStatus, check_index, index_path, write_index,
};
pub use report::Tally;
pub use scan::{
    Defect, Discovery, SetOutcome, SetReport, discover_set_files, inspect_set_file,
    parse_document, report_for_document, scan_sets,
};
pub use validate::{SetValidation, validate_set};

use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

/// Directory scanned when neither `--dir` nor `CARDSET_DIR` is given.
pub const DEFAULT_SETS_DIR: &str = "bundled";
/// Generated manifest; never treated as a set.
pub const INDEX_FILE_NAME: &str = "index.json";
pub const UNKNOWN_NAME: &str = "Unknown";
pub const EXPORTED_AT_FALLBACK: &str = "Not specified";

const ENV_SETS_DIR: &str = "CARDSET_DIR";

/// Pick the sets directory: explicit path, then `CARDSET_DIR`, then the default.
pub fn resolve_sets_dir(cli_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }
    sets_dir_from_hint(env::var(ENV_SETS_DIR).ok().as_deref())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETS_DIR))
}

fn sets_dir_from_hint(hint: Option<&str>) -> Option<PathBuf> {
    let hint = hint?.trim();
    if hint.is_empty() {
        return None;
    }
    Some(PathBuf::from(hint))
}

/// Render a JSON value for console output: strings bare, anything else as
/// compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
