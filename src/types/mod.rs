//! Types module
//!
//! Contains core data structures used throughout the ledger:
//! - `account`: Account, listing filter, money parsing
//! - `transaction`: completed transfer records
//! - `record`: normalized import records
//! - `error`: error types for the ledger

pub mod account;
pub mod error;
pub mod record;
pub mod transaction;

pub use account::{parse_amount, parse_balance, Account, AccountFilter, AccountId, NAME_MAX_CHARS};
pub use error::LedgerError;
pub use record::RawAccountRecord;
pub use transaction::{Transaction, TransactionId};
