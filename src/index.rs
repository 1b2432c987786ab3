//! The `index.json` manifest of valid sets.
//!
//! The manifest is derived from the latest scan only and replaces whatever was
//! on disk before; entries from earlier runs are never merged in. An empty
//! manifest is never written, so a scan that finds nothing valid leaves the
//! previous file in place.

use crate::INDEX_FILE_NAME;
use crate::scan::SetReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filenames of the valid sets, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub files: Vec<String>,
}

impl IndexManifest {
    pub fn from_reports(reports: &[SetReport]) -> Self {
        let files = reports
            .iter()
            .filter(|report| report.is_valid())
            .map(|report| report.file.clone())
            .collect();
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read a manifest previously written to `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading index manifest {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing index manifest {}", path.display()))
    }

    /// Pretty JSON with two-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing index manifest")
    }
}

/// What [`write_index`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    Written { path: PathBuf, count: usize },
    NothingToIndex,
}

pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE_NAME)
}

/// Write `<dir>/index.json` listing every valid report.
///
/// The manifest is staged in a temporary file inside `dir` and renamed over
/// the target, so a failed write leaves the old manifest intact.
pub fn write_index(dir: &Path, reports: &[SetReport]) -> Result<IndexOutcome> {
    let manifest = IndexManifest::from_reports(reports);
    if manifest.is_empty() {
        return Ok(IndexOutcome::NothingToIndex);
    }

    let path = index_path(dir);
    let body = manifest.to_json()?;
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary index in {}", dir.display()))?;
    staged
        .write_all(body.as_bytes())
        .with_context(|| format!("writing temporary index for {}", path.display()))?;
    // NamedTempFile creates 0600; the manifest gets ordinary file permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("setting permissions for {}", path.display()))?;
    }
    staged
        .persist(&path)
        .map_err(|err| err.error)
        .with_context(|| format!("replacing {}", path.display()))?;

    Ok(IndexOutcome::Written {
        path,
        count: manifest.files.len(),
    })
}

/// How the manifest on disk compares with the one a scan would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// `index.json` matches byte for byte.
    Current,
    /// `index.json` is missing or differs.
    Stale { expected: IndexManifest },
    /// No valid sets, so no manifest would be written.
    NotNeeded,
}

/// Compare `<dir>/index.json` with the manifest [`write_index`] would produce.
pub fn check_index(dir: &Path, reports: &[SetReport]) -> Result<IndexStatus> {
    let expected = IndexManifest::from_reports(reports);
    if expected.is_empty() {
        return Ok(IndexStatus::NotNeeded);
    }

    let path = index_path(dir);
    let on_disk = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(IndexStatus::Stale { expected });
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    if on_disk == expected.to_json()? {
        Ok(IndexStatus::Current)
    } else {
        Ok(IndexStatus::Stale { expected })
    }
}
