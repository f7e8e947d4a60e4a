//! Transaction-related types for the ledger
//!
//! A transaction is the immutable record of one completed transfer. It holds
//! account ids only; accounts are owned by the store.

use super::account::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Transaction identifier
///
/// Assigned by the transaction log in append order, starting at 1.
pub type TransactionId = u64;

/// Record of a completed transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Account the funds were taken from
    pub sender_id: AccountId,

    /// Account the funds were credited to
    ///
    /// May equal `sender_id`; self-transfers are recorded like any other.
    pub receiver_id: AccountId,

    /// Amount moved, always strictly positive
    pub amount: Decimal,

    pub timestamp: DateTime<Utc>,
}
