//! Bulk account import
//!
//! This module provides the `AccountImporter`, which decodes an import file
//! and upserts every record into the account store.
//!
//! # Failure Policy
//!
//! - An unsupported extension or malformed content fails the whole call
//!   before any record is applied.
//! - Records are applied one at a time, in file order. The first record that
//!   fails validation stops the batch; records applied before it stay applied.
//!   The [`ImportReport`] says exactly which ids were applied and which record
//!   failed.

use crate::core::traits::{AccountStore, UpsertOutcome};
use crate::io::ImportFormat;
use crate::types::{parse_balance, AccountId, LedgerError, RawAccountRecord};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// The record that stopped an import
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Zero-based position of the record in the file
    pub index: usize,
    /// The record's id as written in the file
    pub record_id: String,
    pub error: LedgerError,
}

/// Per-record outcome of one import call
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub format: ImportFormat,
    /// Ids of accounts created, in file order
    pub created: Vec<AccountId>,
    /// Ids of existing accounts overwritten, in file order
    pub updated: Vec<AccountId>,
    /// First failing record, if the batch was cut short
    pub failure: Option<RecordFailure>,
}

impl ImportReport {
    fn new(format: ImportFormat) -> Self {
        ImportReport {
            format,
            created: Vec::new(),
            updated: Vec::new(),
            failure: None,
        }
    }

    /// Number of records applied to the store
    pub fn applied(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Applied count, or the error of the record that stopped the batch
    pub fn into_result(self) -> Result<usize, LedgerError> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok(self.applied()),
        }
    }
}

/// Decodes import files and funnels their records into an account store
pub struct AccountImporter<S> {
    store: Arc<S>,
}

impl<S: AccountStore> AccountImporter<S> {
    pub fn new(store: Arc<S>) -> Self {
        AccountImporter { store }
    }

    /// Import every account in `input`, choosing the format from `file_name`
    ///
    /// # Errors
    ///
    /// Returns an error, with nothing applied, if:
    /// - The file extension is not csv, json or xml
    /// - The content is malformed for that format
    ///
    /// Per-record validation failures are reported in the returned
    /// [`ImportReport`] instead.
    pub fn import(&self, file_name: &str, input: &[u8]) -> Result<ImportReport, LedgerError> {
        let format = ImportFormat::from_file_name(file_name)?;
        let records = format.decode(input)?;
        let mut report = ImportReport::new(format);

        for (index, record) in records.iter().enumerate() {
            match self.apply(record) {
                Ok((id, UpsertOutcome::Created)) => report.created.push(id),
                Ok((id, UpsertOutcome::Updated)) => report.updated.push(id),
                Err(error) => {
                    warn!(
                        file = file_name,
                        index,
                        record_id = %record.id,
                        %error,
                        "import stopped at invalid record"
                    );
                    report.failure = Some(RecordFailure {
                        index,
                        record_id: record.id.clone(),
                        error,
                    });
                    break;
                }
            }
        }

        info!(
            file = file_name,
            %format,
            created = report.created.len(),
            updated = report.updated.len(),
            complete = report.is_complete(),
            "import finished"
        );
        Ok(report)
    }

    fn apply(&self, record: &RawAccountRecord) -> Result<(AccountId, UpsertOutcome), LedgerError> {
        let id = parse_account_id(&record.id)?;
        let balance = parse_balance(&record.balance)?;
        let outcome = self.store.upsert(id, &record.name, balance)?;
        Ok((id, outcome))
    }
}

/// Parse an account id written as UUID text
pub fn parse_account_id(raw: &str) -> Result<AccountId, LedgerError> {
    Uuid::parse_str(raw.trim()).map_err(|_| LedgerError::invalid_account_id(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account_store::InMemoryAccountStore;
    use crate::types::AccountFilter;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const ID_3: &str = "33333333-3333-3333-3333-333333333333";
    const ID_4: &str = "44444444-4444-4444-4444-444444444444";

    fn importer() -> (Arc<InMemoryAccountStore>, AccountImporter<InMemoryAccountStore>) {
        let store = Arc::new(InMemoryAccountStore::new());
        (Arc::clone(&store), AccountImporter::new(store))
    }

    #[test]
    fn test_import_csv_creates_account() {
        let (store, importer) = importer();
        let input = format!("ID,Name,Balance\n{},Account 3,1000.00", ID_3);

        let report = importer.import("test.csv", input.as_bytes()).unwrap();

        let id = parse_account_id(ID_3).unwrap();
        assert_eq!(report.format, ImportFormat::Csv);
        assert_eq!(report.created, vec![id]);
        assert!(report.is_complete());
        let account = store.get(&id).unwrap();
        assert_eq!(account.name, "Account 3");
        assert_eq!(account.balance, dec!(1000.00));
    }

    #[test]
    fn test_reimport_updates_instead_of_duplicating() {
        let (store, importer) = importer();
        let first = format!(r#"[{{"ID":"{}","Name":"Account 4","Balance":"1500.00"}}]"#, ID_4);
        let second = format!(r#"[{{"ID":"{}","Name":"Account Four","Balance":"10.00"}}]"#, ID_4);

        importer.import("a.json", first.as_bytes()).unwrap();
        let report = importer.import("a.json", second.as_bytes()).unwrap();

        assert_eq!(report.updated.len(), 1);
        assert_eq!(store.len(), 1);
        let account = store.get(&parse_account_id(ID_4).unwrap()).unwrap();
        assert_eq!(account.name, "Account Four");
        assert_eq!(account.balance, dec!(10.00));
    }

    #[test]
    fn test_unsupported_extension_applies_nothing() {
        let (store, importer) = importer();
        let input = format!("ID,Name,Balance\n{},Account 3,1000.00", ID_3);

        let result = importer.import("test.txt", input.as_bytes());

        assert_eq!(result, Err(LedgerError::unsupported_format(Some("txt"))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_applies_nothing() {
        let (store, importer) = importer();
        let input = format!("ID,Name,Balance\n{},Account 3,1000.00\nbroken,row", ID_3);

        let result = importer.import("test.csv", input.as_bytes());

        assert!(matches!(result, Err(LedgerError::Format { .. })));
        assert!(store.is_empty());
    }

    #[rstest]
    #[case::bad_balance("abc", ID_4)]
    #[case::negative_balance("-1.00", ID_4)]
    #[case::bad_id("5.00", "not-a-uuid")]
    fn test_invalid_record_stops_batch_keeping_earlier_records(
        #[case] balance: &str,
        #[case] id: &str,
    ) {
        let (store, importer) = importer();
        let input = format!(
            "ID,Name,Balance\n{},First,1.00\n{},Second,{}\n{},Third,3.00\n",
            ID_3,
            id,
            balance,
            "55555555-5555-5555-5555-555555555555"
        );

        let report = importer.import("batch.csv", input.as_bytes()).unwrap();

        assert_eq!(report.created, vec![parse_account_id(ID_3).unwrap()]);
        let failure = report.failure.clone().unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.record_id, id);
        assert!(matches!(failure.error, LedgerError::Validation { .. }));
        assert_eq!(store.list(&AccountFilter::default()).len(), 1);
        assert!(matches!(
            report.into_result(),
            Err(LedgerError::Validation { .. })
        ));
    }

    #[test]
    fn test_into_result_counts_applied_records() {
        let (_, importer) = importer();
        let input = format!(
            "<Accounts><A><ID>{}</ID><Name>A</Name><Balance>1</Balance></A>\
             <A><ID>{}</ID><Name>B</Name><Balance>2</Balance></A></Accounts>",
            ID_3, ID_4
        );

        let report = importer.import("accounts.XML", input.as_bytes()).unwrap();

        assert_eq!(report.into_result(), Ok(2));
    }

    #[rstest]
    #[case::hyphenated(ID_3)]
    #[case::padded(" 33333333-3333-3333-3333-333333333333 ")]
    #[case::simple("33333333333333333333333333333333")]
    fn test_parse_account_id(#[case] raw: &str) {
        assert_eq!(
            parse_account_id(raw).unwrap(),
            Uuid::from_u128(0x33333333_3333_3333_3333_333333333333)
        );
    }

    #[test]
    fn test_parse_account_id_rejects_garbage() {
        assert!(matches!(
            parse_account_id(""),
            Err(LedgerError::Validation { .. })
        ));
    }
}
