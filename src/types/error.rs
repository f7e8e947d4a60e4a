//! Error types for the ledger
//!
//! This module defines every error the ledger core can report. All of them are
//! local, recoverable conditions surfaced to the caller; none is retried.
//!
//! # Error Categories
//!
//! - **Import Errors**: unsupported file extension, malformed file content
//! - **Validation Errors**: bad balance, bad id, name too long
//! - **Lookup Errors**: referenced account does not exist
//! - **Transfer Errors**: invalid amount, insufficient balance, overflow

use super::account::{AccountId, NAME_MAX_CHARS};
use rust_decimal::Decimal;
use thiserror::Error;

/// User-facing message for an unknown import file extension
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file type please use: Csv/Json/XML";

/// User-facing message for a transfer amount that is zero or negative
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid transfer amount.";

/// User-facing message for a transfer the source account cannot cover
pub const INSUFFICIENT_BALANCE_MESSAGE: &str = "Insufficient balance in the source account.";

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Import file extension is not one of csv, json, xml
    ///
    /// Fatal to the whole import call; no records are applied.
    #[error("{}", UNSUPPORTED_FORMAT_MESSAGE)]
    UnsupportedFormat {
        /// The lower-cased extension, if the file name had one
        extension: Option<String>,
    },

    /// Import file content is malformed for its declared format
    ///
    /// Fatal to the whole import call; no records are applied.
    #[error("Malformed {format} input{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Format {
        /// Declared format name (CSV, JSON, XML)
        format: &'static str,
        /// Line number where the problem was found (if known)
        line: Option<u64>,
        message: String,
    },

    /// A single value failed validation
    ///
    /// During an import this aborts the remaining records of the batch.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Referenced account does not exist
    #[error("Account {id} not found")]
    NotFound { id: AccountId },

    /// Transfer amount is zero or negative
    #[error("{}", INVALID_AMOUNT_MESSAGE)]
    InvalidAmount { amount: Decimal },

    /// Transfer amount is not strictly below the source balance
    #[error("{}", INSUFFICIENT_BALANCE_MESSAGE)]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    /// Balance arithmetic would overflow the money type
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        operation: String,
        account: AccountId,
    },

    /// I/O error while reading input files or writing output
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    pub fn unsupported_format(extension: Option<&str>) -> Self {
        LedgerError::UnsupportedFormat {
            extension: extension.map(str::to_string),
        }
    }

    pub fn format(format: &'static str, line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::Format {
            format,
            line,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_balance(raw: &str) -> Self {
        Self::validation(format!("'{}' is not a valid balance", raw))
    }

    pub fn invalid_amount_text(raw: &str) -> Self {
        Self::validation(format!("'{}' is not a valid amount", raw))
    }

    pub fn negative_balance(balance: Decimal) -> Self {
        Self::validation(format!("balance {} must not be negative", balance))
    }

    pub fn invalid_account_id(raw: &str) -> Self {
        Self::validation(format!("'{}' is not a valid account id", raw))
    }

    pub fn name_too_long(name: &str, length: usize) -> Self {
        Self::validation(format!(
            "name '{}' has {} characters, at most {} allowed",
            name, length, NAME_MAX_CHARS
        ))
    }

    pub fn not_found(id: AccountId) -> Self {
        LedgerError::NotFound { id }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }
}
