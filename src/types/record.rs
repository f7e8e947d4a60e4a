//! Normalized account record produced by the format decoders

/// One account as read from an import file
///
/// Every field is kept as text. Id and balance are validated when the record
/// is applied to the account store, not while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccountRecord {
    pub id: String,
    pub name: String,
    pub balance: String,
}

impl RawAccountRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: impl Into<String>) -> Self {
        RawAccountRecord {
            id: id.into(),
            name: name.into(),
            balance: balance.into(),
        }
    }
}
