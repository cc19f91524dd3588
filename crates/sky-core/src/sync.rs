//! End-to-end run: read the inputs, merge, write the table back

use crate::config::SyncPaths;
use crate::error::{Error, Result};
use crate::identifiers::load_identifiers;
use crate::merger::{merge, MergeReport};
use crate::parser::load_table;
use crate::translations::load_translations;
use crate::writer::{render_table, write_table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

/// How many identifiers to echo in the log after reading the level list
const PREVIEW_LEN: usize = 10;

/// Record of one run, suitable for dumping as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Table that was (or would have been) rewritten
    pub table: PathBuf,
    /// Identifiers read from the level list
    pub identifiers: usize,
    /// Entries in the primary translation file
    pub primary_entries: usize,
    /// Entries in the secondary translation file
    pub secondary_entries: usize,
    /// Records in the table after merging
    pub total_records: usize,
    /// Whether the table file was rewritten
    pub written: bool,
    /// What the merge changed
    pub merge: MergeReport,
}

impl SyncReport {
    /// Save the report as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Result of [`sync_table`]
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The rendered document
    pub rendered: String,
    pub report: SyncReport,
}

/// Update the dump table at `paths.table` from the level list and both
/// translation files.
///
/// Missing inputs abort before anything is read. Unreadable inputs are
/// logged and treated as empty. With `dry_run` the table file is left
/// alone and the caller gets the rendered document only.
#[instrument(level = "info", skip_all, fields(table = %paths.table.display(), dry_run = dry_run))]
pub fn sync_table(paths: &SyncPaths, dry_run: bool) -> Result<SyncOutcome> {
    paths.check_exists()?;

    let identifiers = load_identifiers(&paths.levels);
    info!(count = identifiers.len(), "read level identifiers");
    debug!(preview = %preview(&identifiers), "first identifiers");

    let primary = load_translations(&paths.primary);
    let secondary = load_translations(&paths.secondary);
    info!(
        primary = primary.len(),
        secondary = secondary.len(),
        "read translation entries"
    );

    let mut table = load_table(&paths.table);
    debug!(headers = ?table.header_names(), "table header");

    let merge_report = merge(&mut table, &identifiers, &primary, &secondary);
    let rendered = render_table(&table);

    if !dry_run {
        if let Err(err) = write_table(&paths.table, &table) {
            error!(chain = %error_chain(&err), "failed to write table");
            return Err(err);
        }
    }

    let report = SyncReport {
        generated_at: Utc::now(),
        table: paths.table.clone(),
        identifiers: identifiers.len(),
        primary_entries: primary.len(),
        secondary_entries: secondary.len(),
        total_records: table.records.len(),
        written: !dry_run,
        merge: merge_report,
    };

    Ok(SyncOutcome { rendered, report })
}

/// `a, b, c...` for log output
fn preview(identifiers: &[String]) -> String {
    let mut text = identifiers
        .iter()
        .take(PREVIEW_LEN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if identifiers.len() > PREVIEW_LEN {
        text.push_str("...");
    }
    text
}

/// Flatten an error and all of its sources into one line
pub fn error_chain(err: &Error) -> String {
    let mut text = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        text.push_str(": caused by: ");
        text.push_str(&cause.to_string());
        source = StdError::source(cause);
    }
    text
}
