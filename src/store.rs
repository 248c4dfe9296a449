//! The record store: a single CSV file that transactions are appended to and loaded from.
//!
//! The file is opened, fully read or appended to, and closed on every operation. Rows are never
//! updated or removed.

use crate::model::{Transaction, Transactions, HEADERS};
use crate::Result;
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Appends transactions to, and loads transactions from, the CSV file at `path`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row for `transaction`. When the file does not exist yet, or is empty, the
    /// header row is written first.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        let path = self.path();
        let needs_header = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                return Err(e).with_context(|| format!("Unable to inspect {}", path.display()))
            }
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Unable to open {} for appending", path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            trace!("Writing the header row to {}", path.display());
            writer
                .write_record(HEADERS)
                .with_context(|| format!("Unable to write the header row to {}", path.display()))?;
        }
        writer
            .write_record(transaction.to_row())
            .with_context(|| format!("Unable to write a transaction to {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Unable to flush {}", path.display()))?;

        debug!(
            "Appended {} {} '{}' to {}",
            transaction.kind(),
            transaction.amount(),
            transaction.category(),
            path.display()
        );
        Ok(())
    }

    /// Loads every transaction in file order. A missing file is not an error, it simply means
    /// there are no transactions yet. Rows with an amount that does not parse, or with an
    /// unrecognized `Type`, are dropped and counted in `Transactions::skipped`.
    pub fn load_all(&self) -> Result<Transactions> {
        let path = self.path();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No transactions file at {}", path.display());
                return Ok(Transactions::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Unable to read {}", path.display()))
            }
        };
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&content);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        let mut unreadable = 0;
        for (ix, result) in reader.records().enumerate() {
            match result {
                Ok(record) => rows.push(record),
                Err(e) => {
                    debug!("Skipping unreadable record {} in {}: {e}", ix + 1, path.display());
                    unreadable += 1;
                }
            }
        }

        let mut transactions = Transactions::parse(rows.iter().map(|r| r.iter()));
        transactions.add_skipped(unreadable);
        debug!(
            "Loaded {} transactions from {} ({} skipped)",
            transactions.len(),
            path.display(),
            transactions.skipped()
        );
        Ok(transactions)
    }
}
