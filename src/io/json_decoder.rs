//! JSON account decoder
//!
//! Input is an array of objects carrying the keys `ID`, `Name` and `Balance`.
//! `Balance` may be written as a string or as a JSON number.

use crate::io::format::AccountDecoder;
use crate::types::{LedgerError, RawAccountRecord};
use serde::Deserialize;

const FORMAT: &str = "JSON";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

#[derive(Debug, Deserialize)]
struct JsonAccount {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Balance")]
    balance: JsonBalance,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBalance {
    Text(String),
    Number(serde_json::Number),
}

impl From<JsonAccount> for RawAccountRecord {
    fn from(account: JsonAccount) -> Self {
        let balance = match account.balance {
            JsonBalance::Text(text) => text,
            JsonBalance::Number(number) => number.to_string(),
        };
        RawAccountRecord::new(account.id, account.name, balance)
    }
}

impl AccountDecoder for JsonDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<RawAccountRecord>, LedgerError> {
        let accounts: Vec<JsonAccount> = serde_json::from_slice(input).map_err(|e| {
            LedgerError::format(FORMAT, Some(e.line() as u64).filter(|l| *l > 0), e.to_string())
        })?;
        Ok(accounts.into_iter().map(RawAccountRecord::from).collect())
    }
}
