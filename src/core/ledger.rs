//! Ledger facade
//!
//! The `Ledger` is the narrow interface a presentation layer calls into. It
//! owns the account store and transaction log and exposes one entry point per
//! user action: import, transfer, create, list, and the account statement.

use crate::core::account_store::InMemoryAccountStore;
use crate::core::engine::{TransferEngine, TransferOutcome};
use crate::core::importer::{AccountImporter, ImportReport};
use crate::core::traits::{AccountStore, TransactionLog};
use crate::core::transaction_log::InMemoryTransactionLog;
use crate::types::{Account, AccountFilter, AccountId, LedgerError, Transaction};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

/// An account together with its transfer history
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStatement {
    pub account: Account,
    pub sent: Vec<Transaction>,
    pub received: Vec<Transaction>,
}

pub struct Ledger<S = InMemoryAccountStore, L = InMemoryTransactionLog> {
    store: Arc<S>,
    log: Arc<L>,
    engine: TransferEngine<S, L>,
    importer: AccountImporter<S>,
}

impl Ledger {
    /// Create an empty in-memory ledger
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryTransactionLog::new()),
        )
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, L> Ledger<S, L>
where
    S: AccountStore,
    L: TransactionLog,
{
    /// Build a ledger over caller-provided storage
    pub fn with_parts(store: Arc<S>, log: Arc<L>) -> Self {
        Ledger {
            engine: TransferEngine::new(Arc::clone(&store), Arc::clone(&log)),
            importer: AccountImporter::new(Arc::clone(&store)),
            store,
            log,
        }
    }

    /// Import accounts and return how many records were applied
    ///
    /// If a record fails validation, its error is returned; records before
    /// it remain applied.
    pub fn import_accounts(&self, file_name: &str, input: &[u8]) -> Result<usize, LedgerError> {
        self.import_accounts_report(file_name, input)?.into_result()
    }

    /// Import accounts and return the per-record report
    pub fn import_accounts_report(
        &self,
        file_name: &str,
        input: &[u8],
    ) -> Result<ImportReport, LedgerError> {
        self.importer.import(file_name, input)
    }

    /// Transfer funds between two existing accounts
    ///
    /// # Errors
    ///
    /// - `NotFound` if either id is unknown
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `InsufficientFunds` if the amount is not strictly below the sender's balance
    /// - `ArithmeticOverflow` if the receiver's balance would overflow
    pub fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        match self.engine.transfer(from, to, amount)? {
            TransferOutcome::Completed(transaction) => {
                info!(
                    id = transaction.id,
                    %from,
                    %to,
                    %amount,
                    "transfer completed"
                );
                Ok(transaction)
            }
            TransferOutcome::Rejected { balance } => {
                let error = if amount <= Decimal::ZERO {
                    LedgerError::invalid_amount(amount)
                } else {
                    LedgerError::insufficient_funds(*from, balance, amount)
                };
                warn!(%from, %to, %amount, %error, "transfer rejected");
                Err(error)
            }
        }
    }

    /// Create an account with a generated id
    pub fn create_account(&self, name: &str, balance: Decimal) -> Result<Account, LedgerError> {
        let account = self.store.create(name, balance)?;
        info!(id = %account.id, name, %balance, "account created");
        Ok(account)
    }

    pub fn get_account(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.store.get(id)
    }

    /// Accounts matching the filter, sorted by name
    pub fn list_accounts(&self, filter: &AccountFilter) -> Vec<Account> {
        self.store.list(filter)
    }

    pub fn sent_transactions(&self, id: &AccountId) -> Vec<Transaction> {
        self.log.sent_by(id)
    }

    pub fn received_transactions(&self, id: &AccountId) -> Vec<Transaction> {
        self.log.received_by(id)
    }

    /// Every completed transfer, in creation order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.log.all()
    }

    /// Account details with sent and received transfers
    pub fn account_statement(&self, id: &AccountId) -> Result<AccountStatement, LedgerError> {
        let account = self.store.get(id)?;
        Ok(AccountStatement {
            sent: self.log.sent_by(id),
            received: self.log.received_by(id),
            account,
        })
    }
}
