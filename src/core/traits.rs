//! Core traits for account storage and the transaction log
//!
//! The ledger only touches persistent state through these two repositories,
//! so the in-memory implementations can be swapped for other backends.

use crate::types::{Account, AccountFilter, AccountId, LedgerError, Transaction};
use rust_decimal::Decimal;

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Both sides of a transfer, locked for the duration of a closure
///
/// A self-transfer locks its single account once and is handed over as `Same`.
#[derive(Debug)]
pub enum AccountPair<'a> {
    Distinct {
        first: &'a mut Account,
        second: &'a mut Account,
    },
    Same(&'a mut Account),
}

/// Storage of accounts keyed by id
///
/// Implementations must be safe to share between threads. Accounts are never
/// deleted.
pub trait AccountStore: Send + Sync {
    /// Create an account with a generated id
    ///
    /// Fails with a validation error if the name is too long or the balance
    /// is negative.
    fn create(&self, name: &str, balance: Decimal) -> Result<Account, LedgerError>;

    /// Create the account or overwrite name and balance of an existing one
    ///
    /// `created_at` of an existing account is left untouched; `updated_at`
    /// is refreshed.
    fn upsert(
        &self,
        id: AccountId,
        name: &str,
        balance: Decimal,
    ) -> Result<UpsertOutcome, LedgerError>;

    /// Snapshot of a single account
    fn get(&self, id: &AccountId) -> Result<Account, LedgerError>;

    /// Snapshot of all accounts matching the filter, sorted by name
    fn list(&self, filter: &AccountFilter) -> Vec<Account>;

    /// Number of stored accounts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` with both accounts locked against concurrent mutation
    ///
    /// Fails with `NotFound` before calling `f` if either account is absent.
    fn update_pair<T, F>(
        &self,
        first: &AccountId,
        second: &AccountId,
        f: F,
    ) -> Result<T, LedgerError>
    where
        F: FnOnce(AccountPair<'_>) -> Result<T, LedgerError>;
}

/// Append-only record of completed transfers
pub trait TransactionLog: Send + Sync {
    /// Append a transfer and return the stored transaction with its id
    fn append(&self, sender_id: AccountId, receiver_id: AccountId, amount: Decimal)
        -> Transaction;

    /// Transactions sent by the account, in creation order
    fn sent_by(&self, account: &AccountId) -> Vec<Transaction>;

    /// Transactions received by the account, in creation order
    fn received_by(&self, account: &AccountId) -> Vec<Transaction>;

    /// Every transaction, in creation order
    fn all(&self) -> Vec<Transaction>;
}
