//! Transfer engine
//!
//! This module provides the TransferEngine that moves funds between two
//! existing accounts and records the move in the transaction log.
//!
//! The engine enforces the transfer rules:
//! - The amount must be strictly positive
//! - The amount must be strictly below the sender's balance, so an account
//!   can never be emptied by a transfer
//! - Balance checks, both balance updates and the log append happen while
//!   both accounts are locked, so concurrent transfers cannot lose updates
//!
//! A rejected transfer is not an error: the engine reports it as
//! [`TransferOutcome::Rejected`] together with the sender balance it saw,
//! and leaves both accounts untouched. Telling an invalid amount apart from
//! insufficient funds is the caller's job.
//!
//! Balance arithmetic must be exact. A debit or credit the money type can
//! only hold by rounding fails with `ArithmeticOverflow` before anything
//! changes.

use crate::core::traits::{AccountPair, AccountStore, TransactionLog};
use crate::types::{AccountId, LedgerError, Transaction};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Result of a transfer attempt against two existing accounts
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// Funds moved; the recorded transaction is returned
    Completed(Transaction),
    /// Preconditions not met; nothing changed
    Rejected {
        /// Sender balance observed while the accounts were locked
        balance: Decimal,
    },
}

/// `a + b` or `a - b` without rounding
///
/// `Decimal` keeps the larger operand scale unless the result needs more than
/// 28 significant digits, in which case it rounds to a smaller scale.
fn exact(result: Option<Decimal>, a: Decimal, b: Decimal) -> Option<Decimal> {
    result.filter(|r| r.scale() >= a.scale().max(b.scale()))
}

/// Balance-conserving transfer of funds between accounts
pub struct TransferEngine<S, L> {
    store: Arc<S>,
    log: Arc<L>,
}

impl<S, L> TransferEngine<S, L>
where
    S: AccountStore,
    L: TransactionLog,
{
    pub fn new(store: Arc<S>, log: Arc<L>) -> Self {
        TransferEngine { store, log }
    }

    /// Check the transfer preconditions: `0 < amount < balance`
    pub fn is_permitted(amount: Decimal, balance: Decimal) -> bool {
        amount > Decimal::ZERO && amount < balance
    }

    /// Move `amount` from one account to another
    ///
    /// # Returns
    ///
    /// * `Ok(TransferOutcome::Completed(tx))` - Balances updated, `tx` appended to the log
    /// * `Ok(TransferOutcome::Rejected { balance })` - Amount not positive or not below the sender's balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either account does not exist
    /// - The debit or credit cannot be represented exactly by the money type
    ///
    /// No account is modified when an error or a rejection is returned.
    pub fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        self.store.update_pair(from, to, |pair| match pair {
            AccountPair::Same(account) => {
                if !Self::is_permitted(amount, account.balance) {
                    return Ok(TransferOutcome::Rejected {
                        balance: account.balance,
                    });
                }
                // Debit and credit cancel out; only the timestamp moves.
                account.touch();
                let transaction = self.log.append(account.id, account.id, amount);
                debug!(id = transaction.id, account = %account.id, %amount, "self-transfer recorded");
                Ok(TransferOutcome::Completed(transaction))
            }
            AccountPair::Distinct {
                first: sender,
                second: receiver,
            } => {
                if !Self::is_permitted(amount, sender.balance) {
                    return Ok(TransferOutcome::Rejected {
                        balance: sender.balance,
                    });
                }

                let new_sender_balance = exact(
                    sender.balance.checked_sub(amount),
                    sender.balance,
                    amount,
                )
                .ok_or_else(|| LedgerError::arithmetic_overflow("transfer debit", sender.id))?;
                let new_receiver_balance = exact(
                    receiver.balance.checked_add(amount),
                    receiver.balance,
                    amount,
                )
                .ok_or_else(|| LedgerError::arithmetic_overflow("transfer credit", receiver.id))?;

                sender.balance = new_sender_balance;
                receiver.balance = new_receiver_balance;
                sender.touch();
                receiver.touch();

                let transaction = self.log.append(sender.id, receiver.id, amount);
                debug!(
                    id = transaction.id,
                    sender = %sender.id,
                    receiver = %receiver.id,
                    %amount,
                    "transfer recorded"
                );
                Ok(TransferOutcome::Completed(transaction))
            }
        })
    }
}
