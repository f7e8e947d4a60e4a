//! Append-only transaction log
//!
//! Completed transfers are recorded here and never mutated or removed.
//! Ids are assigned under the write lock, so ascending id order is the order
//! of appends.

use crate::core::traits::TransactionLog;
use crate::types::{AccountId, Transaction};
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn select<P>(&self, predicate: P) -> Vec<Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        self.transactions
            .read()
            .iter()
            .filter(|tx| predicate(*tx))
            .cloned()
            .collect()
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn append(
        &self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: Decimal,
    ) -> Transaction {
        let mut transactions = self.transactions.write();
        let transaction = Transaction {
            id: transactions.len() as u64 + 1,
            sender_id,
            receiver_id,
            amount,
            timestamp: Utc::now(),
        };
        transactions.push(transaction.clone());
        transaction
    }

    fn sent_by(&self, account: &AccountId) -> Vec<Transaction> {
        self.select(|tx| tx.sender_id == *account)
    }

    fn received_by(&self, account: &AccountId) -> Vec<Transaction> {
        self.select(|tx| tx.receiver_id == *account)
    }

    fn all(&self) -> Vec<Transaction> {
        self.transactions.read().clone()
    }
}
