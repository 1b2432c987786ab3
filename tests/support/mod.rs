#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// A throwaway sets directory, removed on drop.
pub struct SetsDir {
    temp: TempDir,
}

impl SetsDir {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("failed to allocate sets dir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn index_path(&self) -> PathBuf {
        self.path().join("index.json")
    }

    pub fn write_json(&self, name: &str, value: &Value) -> Result<PathBuf> {
        self.write_raw(name, &serde_json::to_string_pretty(value)?)
    }

    pub fn write_raw(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write fixture {}", path.display()))?;
        Ok(path)
    }

    pub fn read_index(&self) -> Result<String> {
        fs::read_to_string(self.index_path()).context("failed to read index.json")
    }
}

pub fn set_a() -> Value {
    json!({
        "name": "Set A",
        "cards": [{"answer": "x", "questions": [{"text": "q1"}]}]
    })
}

pub fn spanish_verbs() -> Value {
    json!({
        "name": "Spanish Verbs",
        "exportedAt": "2024-03-02T10:00:00Z",
        "cards": [
            {"answer": "to eat", "questions": [{"text": "comer"}, {"text": "What does 'comer' mean?"}]},
            {"answer": "to drink", "questions": [{"text": "beber"}]},
            {"answer": ["to live", "to reside"], "questions": [{"text": "vivir"}]}
        ]
    })
}
