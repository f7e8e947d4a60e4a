//! Account-related types for the ledger
//!
//! This module defines the Account structure, the listing filter, and the
//! money parsing rules applied whenever a balance enters the ledger as text.

use super::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Account identifier
///
/// Opaque 128-bit identifier, generated on creation when not supplied.
pub type AccountId = Uuid;

/// Maximum length of an account name, counted in characters
pub const NAME_MAX_CHARS: usize = 40;

/// A named balance-holding account
///
/// `id` and `created_at` never change once the account exists.
/// `updated_at` is refreshed on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: AccountId,

    /// Display name, at most [`NAME_MAX_CHARS`] characters
    pub name: String,

    /// Current balance, never negative after a committed operation
    pub balance: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a freshly generated id
    ///
    /// Validation is the caller's concern; see [`validate_name`] and
    /// [`validate_balance`].
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self::with_id(Uuid::new_v4(), name, balance)
    }

    /// Create a new account with a caller-provided id
    pub fn with_id(id: AccountId, name: impl Into<String>, balance: Decimal) -> Self {
        let now = Utc::now();
        Account {
            id,
            name: name.into(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Reject names longer than [`NAME_MAX_CHARS`] characters
pub fn validate_name(name: &str) -> Result<(), LedgerError> {
    let length = name.chars().count();
    if length > NAME_MAX_CHARS {
        return Err(LedgerError::name_too_long(name, length));
    }
    Ok(())
}

/// Reject negative balances
pub fn validate_balance(balance: Decimal) -> Result<(), LedgerError> {
    if balance < Decimal::ZERO {
        return Err(LedgerError::negative_balance(balance));
    }
    Ok(())
}

/// Parse money written as text, without a sign check
///
/// Accepts plain decimal text (`1000.00`) and scientific notation (`1e3`).
/// Surrounding whitespace is ignored. Text that the money type cannot hold
/// exactly is rejected instead of rounded.
///
/// # Errors
///
/// Returns a validation error if the text is empty, not a number, or too precise.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    decimal_exact(raw.trim()).ok_or_else(|| LedgerError::invalid_amount_text(raw))
}

/// Parse a textual balance into the money type
///
/// Same rules as [`parse_amount`], and the value must not be negative.
pub fn parse_balance(raw: &str) -> Result<Decimal, LedgerError> {
    let balance = decimal_exact(raw.trim()).ok_or_else(|| LedgerError::invalid_balance(raw))?;
    validate_balance(balance)?;
    Ok(balance)
}

fn decimal_exact(text: &str) -> Option<Decimal> {
    if let Ok(value) = Decimal::from_str_exact(text) {
        return Some(value);
    }
    let (mantissa, _) = text.split_once(|c: char| c == 'e' || c == 'E')?;
    Decimal::from_str_exact(mantissa).ok()?;
    Decimal::from_scientific(text).ok()
}

/// Filter for account listings
///
/// Every predicate that is present must hold (conjunction). Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFilter {
    /// Case-insensitive substring of the account name
    pub name_contains: Option<String>,
    pub min_balance: Option<Decimal>,
    pub max_balance: Option<Decimal>,
}

impl AccountFilter {
    /// Build a filter from raw query-string values
    ///
    /// Empty values are treated as absent, matching how HTML forms submit
    /// untouched fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a balance bound is present but not a number.
    pub fn from_query(
        name: Option<&str>,
        min_balance: Option<&str>,
        max_balance: Option<&str>,
    ) -> Result<Self, LedgerError> {
        Ok(AccountFilter {
            name_contains: non_empty(name).map(str::to_string),
            min_balance: non_empty(min_balance).map(parse_amount).transpose()?,
            max_balance: non_empty(max_balance).map(parse_amount).transpose()?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_contains = Some(name.into());
        self
    }

    pub fn with_min_balance(mut self, min: Decimal) -> Self {
        self.min_balance = Some(min);
        self
    }

    pub fn with_max_balance(mut self, max: Decimal) -> Self {
        self.max_balance = Some(max);
        self
    }

    /// Check whether an account satisfies every present predicate
    pub fn matches(&self, account: &Account) -> bool {
        if let Some(needle) = &self.name_contains {
            if !account
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if self.min_balance.is_some_and(|min| account.balance < min) {
            return false;
        }
        if self.max_balance.is_some_and(|max| account.balance > max) {
            return false;
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Bounds may be negative; only balances themselves must be non-negative.
