//! Command handlers for the fin CLI.
//!
//! This module contains implementations for all CLI subcommands. Every command that reads data
//! reloads the whole transactions file and recomputes what it shows from scratch.

mod add;
mod analyze;
mod dashboard;
mod init;
mod insights;
mod list;
mod summary;

use crate::model::Transactions;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info, warn};

pub use add::add;
pub use analyze::analyze;
pub use dashboard::{dashboard, Dashboard};
pub use init::init;
pub use insights::insights;
pub use list::list;
pub use summary::{summary, Summary};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads all transactions from the configured store, warning about any rows that were dropped.
fn load(config: &Config) -> Result<Transactions> {
    let transactions = config.store().load_all()?;
    let skipped = transactions.skipped();
    if skipped > 0 {
        warn!(
            "Skipped {} malformed row{} in {}",
            skipped,
            plural(skipped),
            config.data_file().display()
        );
    }
    Ok(transactions)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
