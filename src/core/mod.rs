//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Repository traits for accounts and transactions
//! - `account_store` - In-memory account storage with per-account locking
//! - `transaction_log` - Append-only record of completed transfers
//! - `engine` - Balance-conserving transfers
//! - `importer` - Bulk account import from CSV/JSON/XML files
//! - `ledger` - Facade exposing one entry point per user action

pub mod account_store;
pub mod engine;
pub mod importer;
pub mod ledger;
pub mod traits;
pub mod transaction_log;

pub use account_store::InMemoryAccountStore;
pub use engine::{TransferEngine, TransferOutcome};
pub use importer::{parse_account_id, AccountImporter, ImportReport, RecordFailure};
pub use ledger::{AccountStatement, Ledger};
pub use traits::{AccountPair, AccountStore, TransactionLog, UpsertOutcome};
pub use transaction_log::InMemoryTransactionLog;
