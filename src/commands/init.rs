use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the data directory and an initial `config.json` file.
///
/// # Arguments
/// - `fin_home` - The directory that will be the root of data directory, e.g. `$HOME/fin`
/// - `data_file` - Where to store transactions. Relative paths are resolved against `fin_home`.
/// - `savings_goal` - The default savings goal in percent.
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub async fn init(
    fin_home: &Path,
    data_file: Option<PathBuf>,
    savings_goal: Option<u8>,
) -> Result<Out<PathBuf>> {
    let config = Config::create(fin_home, data_file, savings_goal)
        .await
        .context("Unable to create the data directory and config")?;
    let message = format!(
        "Successfully created the fin directory at {}, transactions will be stored in {}",
        config.root().display(),
        config.data_file().display()
    );
    Ok(Out::new(message, config.data_file().to_path_buf()))
}
