//! Command-line runner
//!
//! Drives a [`Ledger`] the way the presentation layer would: import every
//! input file, apply the requested transfers, then write the filtered
//! account listing.
//!
//! Input files are read concurrently on a tokio runtime and imported
//! sequentially in argument order, so later files overwrite earlier ones
//! when ids collide.

use crate::cli::{CliArgs, OutputFormat};
use crate::core::Ledger;
use crate::io::{write_accounts_csv, write_accounts_json};
use crate::types::LedgerError;
use futures::future::try_join_all;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Contents of one input file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedInput {
    /// File name without directories; its extension selects the format
    pub file_name: String,
    pub bytes: Vec<u8>,
}

async fn load_input(path: &Path) -> Result<LoadedInput, LedgerError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| LedgerError::Io {
        message: format!("Failed to read '{}': {}", path.display(), e),
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LoadedInput { file_name, bytes })
}

/// Read every input file concurrently, keeping argument order
pub async fn load_inputs(paths: &[PathBuf]) -> Result<Vec<LoadedInput>, LedgerError> {
    try_join_all(paths.iter().map(|path| load_input(path))).await
}

/// Run the command line against a fresh in-memory ledger
///
/// # Errors
///
/// Stops at the first failure: unreadable file, import error, rejected
/// transfer, or write error. The error is returned for the caller to report.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let filter = args.account_filter()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .build()
        .map_err(|e| LedgerError::Io {
            message: format!("Failed to create tokio runtime: {}", e),
        })?;
    let inputs = runtime.block_on(load_inputs(&args.input_files))?;

    let ledger = Ledger::new();
    for input in &inputs {
        let applied = ledger.import_accounts(&input.file_name, &input.bytes)?;
        info!(file = %input.file_name, applied, "file imported");
    }

    for request in &args.transfers {
        ledger.transfer(&request.from, &request.to, request.amount)?;
    }

    let accounts = ledger.list_accounts(&filter);
    match args.output {
        OutputFormat::Csv => write_accounts_csv(&accounts, output),
        OutputFormat::Json => write_accounts_json(&accounts, output),
    }
}
