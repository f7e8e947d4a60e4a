//! CSV account decoder
//!
//! The first line is a header that must name the columns `ID`, `Name` and
//! `Balance` (exact, case-sensitive). Data rows are mapped to those columns by
//! position; extra columns are ignored and blank lines are skipped.

use crate::io::format::AccountDecoder;
use crate::types::{LedgerError, RawAccountRecord};
use csv::{ReaderBuilder, StringRecord};

const FORMAT: &str = "CSV";

pub const ID_COLUMN: &str = "ID";
pub const NAME_COLUMN: &str = "Name";
pub const BALANCE_COLUMN: &str = "Balance";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDecoder;

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    id: usize,
    name: usize,
    balance: usize,
}

impl ColumnIndex {
    fn from_header(header: &StringRecord) -> Result<Self, LedgerError> {
        if header.is_empty() {
            return Err(LedgerError::format(FORMAT, Some(1), "missing header row"));
        }
        let position = |column: &str| {
            header.iter().position(|h| h == column).ok_or_else(|| {
                LedgerError::format(FORMAT, Some(1), format!("header has no '{}' column", column))
            })
        };
        Ok(ColumnIndex {
            id: position(ID_COLUMN)?,
            name: position(NAME_COLUMN)?,
            balance: position(BALANCE_COLUMN)?,
        })
    }

    fn extract(&self, row: &StringRecord) -> Result<RawAccountRecord, LedgerError> {
        let field = |index: usize, column: &str| {
            row.get(index).ok_or_else(|| {
                LedgerError::format(
                    FORMAT,
                    row.position().map(|p| p.line()),
                    format!("row has {} fields, no value for '{}'", row.len(), column),
                )
            })
        };
        Ok(RawAccountRecord::new(
            field(self.id, ID_COLUMN)?,
            field(self.name, NAME_COLUMN)?,
            field(self.balance, BALANCE_COLUMN)?,
        ))
    }
}

fn csv_error(error: csv::Error) -> LedgerError {
    let line = error.position().map(|pos| pos.line());
    LedgerError::format(FORMAT, line, error.to_string())
}

impl AccountDecoder for CsvDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<RawAccountRecord>, LedgerError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let columns = ColumnIndex::from_header(reader.headers().map_err(csv_error)?)?;

        reader
            .records()
            .map(|row| columns.extract(&row.map_err(csv_error)?))
            .collect()
    }
}
