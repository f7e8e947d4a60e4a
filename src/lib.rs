//! Account Ledger Library
//! # Overview
//!
//! This library keeps a set of accounts with decimal balances, moves funds
//! between them with balance-conserving transfers, and bulk-imports accounts
//! from CSV, JSON, or XML files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, errors, etc.)
//! - [`io`] - Import format detection, the three decoders, and listing output
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account storage with per-account locking
//!   - [`core::transaction_log`] - Append-only history of completed transfers
//!   - [`core::engine`] - Transfer validation and execution
//!   - [`core::importer`] - Decoded records validated and upserted into the store
//!   - [`core::ledger`] - Facade with one entry point per user action
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`runner`] - Import files, apply transfers, print the listing
//!
//! # Transfers
//!
//! A transfer succeeds only when `0 < amount < sender balance`. The debit,
//! credit, and transaction record are applied together while both accounts
//! are locked, so the sum of all balances never changes and no balance goes
//! negative.
//!
//! # Import
//!
//! The file extension selects the format (case-insensitive). Each record is
//! upserted by id: an existing account gets the new name and balance, an
//! unknown id creates the account. Records are applied in file order and the
//! first invalid record stops the import.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod runner;
pub mod types;

pub use core::{AccountStatement, ImportReport, Ledger, TransferOutcome};
pub use io::{write_accounts_csv, write_accounts_json, ImportFormat};
pub use types::{
    Account, AccountFilter, AccountId, LedgerError, RawAccountRecord, Transaction, TransactionId,
};
