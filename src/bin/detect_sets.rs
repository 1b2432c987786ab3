//! Scans the bundled sets directory and refreshes `index.json`.
//!
//! Usage:
//!   detect-sets                    # scan ./bundled (or $CARDSET_DIR)
//!   detect-sets --dir decks        # scan another directory
//!   detect-sets --check            # verify index.json without writing it
//!   detect-sets --json --no-index  # machine-readable results only
//!
//! Invalid sets never fail the run; they are reported and left out of the
//! index. Only `--check` can exit non-zero, when the manifest is out of date.

use anyhow::{Context, Result};
use cardset_index::report::{write_banner, write_index_outcome, write_rule, write_summary};
use cardset_index::{
    IndexStatus, SetReport, check_index, index_path, resolve_sets_dir, scan_sets, write_index,
};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "detect-sets")]
#[command(about = "Validate bundled flashcard sets and write index.json")]
struct Cli {
    /// Directory holding the set documents; defaults to $CARDSET_DIR or ./bundled.
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Scan and report without touching index.json.
    #[arg(long, conflicts_with = "check")]
    no_index: bool,
    /// Compare index.json with the scan instead of writing it; exits 1 when stale.
    #[arg(long)]
    check: bool,
    /// Print the scan results as a JSON array instead of the human report.
    #[arg(long)]
    json: bool,
}

fn main() {
    match run() {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let dir = resolve_sets_dir(cli.dir.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let reports = if cli.json {
        // Progress and diagnostics go to stderr so stdout stays one JSON document.
        let reports = scan_sets(&dir, &mut io::stderr())?;
        serde_json::to_writer_pretty(&mut out, &reports).context("writing scan results")?;
        writeln!(out)?;
        reports
    } else {
        write_banner(&mut out)?;
        let reports = scan_sets(&dir, &mut out)?;
        if reports.is_empty() {
            return Ok(0);
        }
        write_summary(&mut out, &reports)?;
        writeln!(out)?;
        write_rule(&mut out)?;
        reports
    };

    if cli.check {
        return report_check(&mut out, &dir, &reports);
    }
    if cli.no_index || reports.is_empty() {
        return Ok(0);
    }

    let outcome = write_index(&dir, &reports);
    if cli.json {
        // Keep stdout parseable; the index result goes to stderr.
        write_index_outcome(&mut io::stderr(), &index_path(&dir), &outcome)?;
    } else {
        write_index_outcome(&mut out, &index_path(&dir), &outcome)?;
    }
    Ok(0)
}

fn report_check<W: Write>(out: &mut W, dir: &Path, reports: &[SetReport]) -> Result<i32> {
    let path = index_path(dir);
    match check_index(dir, reports)? {
        IndexStatus::Current => {
            eprintln!("detect-sets: '{}' is up to date", path.display());
            Ok(0)
        }
        IndexStatus::NotNeeded => {
            eprintln!("detect-sets: no valid sets; '{}' not checked", path.display());
            Ok(0)
        }
        IndexStatus::Stale { expected } => {
            out.flush()?;
            eprintln!(
                "detect-sets: '{}' is out of date; expected {}",
                path.display(),
                expected.to_json()?
            );
            Ok(1)
        }
    }
}
