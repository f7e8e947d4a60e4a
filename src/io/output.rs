//! Account listing output
//!
//! Serializes account listings for the command-line runner. Accounts are
//! written in the order given; callers pass the already sorted listing.

use crate::types::{Account, LedgerError};
use csv::Writer;
use std::io::Write;

/// Write accounts as CSV with columns: id, name, balance
///
/// Balances keep the scale they were stored with (`1000.00` stays `1000.00`).
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "name", "balance"])
        .map_err(|e| LedgerError::Io {
            message: format!("Failed to write CSV header: {}", e),
        })?;

    for account in accounts {
        writer
            .write_record([
                account.id.to_string(),
                account.name.clone(),
                account.balance.to_string(),
            ])
            .map_err(|e| LedgerError::Io {
                message: format!("Failed to write account record: {}", e),
            })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write accounts as a pretty-printed JSON array
pub fn write_accounts_json(
    accounts: &[Account],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *output, accounts).map_err(|e| LedgerError::Io {
        message: format!("Failed to write JSON output: {}", e),
    })?;
    writeln!(output)?;
    Ok(())
}
