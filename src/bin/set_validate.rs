//! Validate a single flashcard set document.
//!
//! Usage:
//!   set-validate --file bundled/spanish.json
//!   set-validate < draft.json
//!
//! Prints `valid` or one defect per line; exits 1 when the document is
//! invalid or cannot be parsed.

use anyhow::{Context, Result};
use cardset_index::{parse_document, validate_set};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "set-validate")]
#[command(about = "Check one flashcard set document against the set structure")]
struct Cli {
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn load_document(file: Option<&Path>) -> Result<Value> {
    let raw = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading set document {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("reading set document from stdin")?,
    };
    parse_document(&raw).context("JSON decode error")
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let document = load_document(cli.file.as_deref())?;
    let validation = validate_set(&document);

    if validation.is_valid() {
        println!("valid");
    } else {
        for error in validation.errors() {
            println!("{error}");
        }
    }
    Ok(validation.is_valid())
}
