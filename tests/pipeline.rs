// Scan, summarize, and index over real directories.
mod support;

use anyhow::Result;
use cardset_index::{
    Defect, IndexManifest, IndexOutcome, SetOutcome, Tally, inspect_set_file, scan_sets,
    validate_set, write_index,
};
use serde_json::{Value, json};
use std::fs;
use std::io;
use support::{SetsDir, set_a, spanish_verbs};

fn scan_quietly(sets: &SetsDir) -> Result<Vec<cardset_index::SetReport>> {
    scan_sets(sets.path(), &mut io::sink())
}

#[test]
fn single_valid_set_is_indexed() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("a.json", &set_a())?;

    let reports = scan_quietly(&sets)?;
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert!(report.is_valid());
    assert_eq!(report.card_count(), Some(1));
    assert_eq!(report.exported_at(), Some(&json!("Not specified")));

    let outcome = write_index(sets.path(), &reports)?;
    assert_eq!(
        outcome,
        IndexOutcome::Written {
            path: sets.index_path(),
            count: 1
        }
    );
    let written: Value = serde_json::from_str(&sets.read_index()?)?;
    assert_eq!(written, json!({"files": ["a.json"]}));
    Ok(())
}

#[test]
fn set_without_name_is_rejected() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_raw("b.json", r#"{"cards": []}"#)?;

    let reports = scan_quietly(&sets)?;
    assert!(!reports[0].is_valid());
    assert_eq!(reports[0].name, "Unknown");
    assert!(
        reports[0]
            .errors()
            .iter()
            .any(|e| e == "Missing 'name' field")
    );

    assert_eq!(write_index(sets.path(), &reports)?, IndexOutcome::NothingToIndex);
    assert!(!sets.index_path().exists());
    Ok(())
}

#[test]
fn malformed_json_is_rejected_with_decode_error() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_raw("c.json", "not valid json{")?;

    let reports = scan_quietly(&sets)?;
    let SetOutcome::Invalid { defect, errors } = &reports[0].outcome else {
        panic!("malformed file should be invalid");
    };
    assert_eq!(*defect, Defect::MalformedJson);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("JSON decode error"));
    Ok(())
}

#[test]
fn index_only_directory_is_left_untouched() -> Result<()> {
    let sets = SetsDir::new()?;
    let original = r#"{"files": ["previous.json"]}"#;
    sets.write_raw("index.json", original)?;

    let mut out = Vec::new();
    let reports = scan_sets(sets.path(), &mut out)?;
    assert!(reports.is_empty());
    assert!(String::from_utf8(out)?.contains("No JSON files found"));

    assert_eq!(write_index(sets.path(), &reports)?, IndexOutcome::NothingToIndex);
    assert_eq!(sets.read_index()?, original);
    Ok(())
}

#[test]
fn mixed_directory_indexes_only_valid_sets() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("a.json", &set_a())?;
    sets.write_raw("b.json", r#"{"cards": []}"#)?;

    let reports = scan_quietly(&sets)?;
    assert_eq!(
        Tally::of(&reports),
        Tally {
            total: 2,
            valid: 1,
            invalid: 1
        }
    );

    write_index(sets.path(), &reports)?;
    let manifest = IndexManifest::load(&sets.index_path())?;
    assert_eq!(manifest.files, ["a.json"]);
    Ok(())
}

#[test]
fn results_follow_file_name_order() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("zeta.json", &set_a())?;
    sets.write_json("Alpha.json", &spanish_verbs())?;
    sets.write_json("mid.json", &json!({"name": "Broken", "cards": "nope"}))?;

    let reports = scan_quietly(&sets)?;
    let files: Vec<_> = reports.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, ["Alpha.json", "mid.json", "zeta.json"]);
    assert_eq!(reports[1].name, "Broken");
    assert_eq!(reports[0].card_count(), Some(3));
    assert_eq!(reports[0].exported_at(), Some(&json!("2024-03-02T10:00:00Z")));
    Ok(())
}

#[test]
fn rerunning_produces_identical_index() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("a.json", &set_a())?;
    sets.write_json("spanish.json", &spanish_verbs())?;
    sets.write_raw("broken.json", "[")?;

    write_index(sets.path(), &scan_quietly(&sets)?)?;
    let first = fs::read(sets.index_path())?;
    write_index(sets.path(), &scan_quietly(&sets)?)?;
    let second = fs::read(sets.index_path())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn every_indexed_file_revalidates() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("a.json", &set_a())?;
    sets.write_json("spanish.json", &spanish_verbs())?;
    sets.write_json("no_text.json", &json!({"name": "x", "cards": [{"answer": 1, "questions": [{}]}]}))?;
    sets.write_raw("c.json", "not valid json{")?;

    write_index(sets.path(), &scan_quietly(&sets)?)?;
    let manifest = IndexManifest::load(&sets.index_path())?;
    assert_eq!(manifest.files, ["a.json", "spanish.json"]);
    for file in &manifest.files {
        let report = inspect_set_file(&sets.path().join(file));
        assert!(report.is_valid(), "{file} should re-validate");
        let document: Value = serde_json::from_str(&fs::read_to_string(sets.path().join(file))?)?;
        assert!(validate_set(&document).is_valid());
    }
    Ok(())
}

#[test]
fn later_scan_replaces_earlier_entries() -> Result<()> {
    let sets = SetsDir::new()?;
    sets.write_json("a.json", &set_a())?;
    sets.write_json("spanish.json", &spanish_verbs())?;
    write_index(sets.path(), &scan_quietly(&sets)?)?;

    fs::remove_file(sets.path().join("a.json"))?;
    write_index(sets.path(), &scan_quietly(&sets)?)?;
    assert_eq!(IndexManifest::load(&sets.index_path())?.files, ["spanish.json"]);
    Ok(())
}
