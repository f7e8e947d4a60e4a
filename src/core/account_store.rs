//! In-memory account store
//!
//! This module provides `InMemoryAccountStore`, which owns every account of
//! the ledger and serializes mutations per account.
//!
//! # Locking
//!
//! Accounts live behind their own `parking_lot::Mutex`, indexed by a `DashMap`.
//! Handles are cloned out of the map before an account mutex is taken, so a
//! thread waiting on an account never holds a map shard. Transfers lock both
//! accounts in ascending id order, which rules out lock-order deadlocks
//! between concurrent transfers over the same pair.

use crate::core::traits::{AccountPair, AccountStore, UpsertOutcome};
use crate::types::account::{validate_balance, validate_name};
use crate::types::{Account, AccountFilter, AccountId, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

type AccountSlot = Arc<Mutex<Account>>;

/// Thread-safe account storage
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, AccountSlot>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    fn slot(&self, id: &AccountId) -> Result<AccountSlot, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::not_found(*id))
    }

    fn insert_new(&self, account: Account) {
        self.accounts
            .insert(account.id, Arc::new(Mutex::new(account)));
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, name: &str, balance: Decimal) -> Result<Account, LedgerError> {
        validate_name(name)?;
        validate_balance(balance)?;

        let account = Account::new(name, balance);
        debug!(id = %account.id, name, %balance, "account created");
        self.insert_new(account.clone());
        Ok(account)
    }

    fn upsert(
        &self,
        id: AccountId,
        name: &str,
        balance: Decimal,
    ) -> Result<UpsertOutcome, LedgerError> {
        validate_name(name)?;
        validate_balance(balance)?;

        let existing = match self.accounts.entry(id) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(Account::with_id(id, name, balance))));
                debug!(%id, name, %balance, "account created by upsert");
                return Ok(UpsertOutcome::Created);
            }
        };

        // The shard guard is released above; only the account mutex is held here.
        let mut account = existing.lock();
        account.name = name.to_string();
        account.balance = balance;
        account.touch();
        debug!(%id, name, %balance, "account updated by upsert");
        Ok(UpsertOutcome::Updated)
    }

    fn get(&self, id: &AccountId) -> Result<Account, LedgerError> {
        let slot = self.slot(id)?;
        let account = slot.lock().clone();
        Ok(account)
    }

    fn list(&self, filter: &AccountFilter) -> Vec<Account> {
        let slots: Vec<AccountSlot> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts: Vec<Account> = slots
            .iter()
            .map(|slot| slot.lock().clone())
            .filter(|account| filter.matches(account))
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        accounts
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn update_pair<T, F>(
        &self,
        first: &AccountId,
        second: &AccountId,
        f: F,
    ) -> Result<T, LedgerError>
    where
        F: FnOnce(AccountPair<'_>) -> Result<T, LedgerError>,
    {
        let first_slot = self.slot(first)?;

        if first == second {
            let mut account = first_slot.lock();
            return f(AccountPair::Same(&mut *account));
        }

        let second_slot = self.slot(second)?;

        // Lock in ascending id order regardless of transfer direction.
        let (mut first_guard, mut second_guard) = if first < second {
            let a = first_slot.lock();
            let b = second_slot.lock();
            (a, b)
        } else {
            let b = second_slot.lock();
            let a = first_slot.lock();
            (a, b)
        };

        f(AccountPair::Distinct {
            first: &mut *first_guard,
            second: &mut *second_guard,
        })
    }
}
