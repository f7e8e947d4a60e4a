//! Import format selection
//!
//! The format of an import file is chosen from its extension by a pure
//! mapping onto the closed [`ImportFormat`] enum. Each variant dispatches to
//! its own [`AccountDecoder`] implementation.

use crate::io::csv_decoder::CsvDecoder;
use crate::io::json_decoder::JsonDecoder;
use crate::io::xml_decoder::XmlDecoder;
use crate::types::{LedgerError, RawAccountRecord};
use std::fmt;

/// Decode one file encoding into normalized account records
///
/// Decoding is all-or-nothing: malformed input yields a format error and no
/// records at all.
pub trait AccountDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<RawAccountRecord>, LedgerError>;
}

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    Csv,
    Json,
    Xml,
}

impl ImportFormat {
    pub const ALL: [ImportFormat; 3] = [ImportFormat::Csv, ImportFormat::Json, ImportFormat::Xml];

    /// Select the format from a file name's extension
    ///
    /// The extension is the text after the last `.`, compared lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` when the name has no extension or the
    /// extension is not csv, json or xml.
    pub fn from_file_name(file_name: &str) -> Result<Self, LedgerError> {
        match file_name.rsplit_once('.') {
            Some((_, extension)) => Self::from_extension(extension),
            None => Err(LedgerError::unsupported_format(None)),
        }
    }

    /// Select the format from a bare extension (without the dot)
    pub fn from_extension(extension: &str) -> Result<Self, LedgerError> {
        let tag = extension.to_lowercase();
        match tag.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "json" => Ok(ImportFormat::Json),
            "xml" => Ok(ImportFormat::Xml),
            _ => Err(LedgerError::unsupported_format(Some(&tag))),
        }
    }

    /// Display name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ImportFormat::Csv => "CSV",
            ImportFormat::Json => "JSON",
            ImportFormat::Xml => "XML",
        }
    }

    /// Decode input with this format's decoder
    pub fn decode(self, input: &[u8]) -> Result<Vec<RawAccountRecord>, LedgerError> {
        match self {
            ImportFormat::Csv => CsvDecoder.decode(input),
            ImportFormat::Json => JsonDecoder.decode(input),
            ImportFormat::Xml => XmlDecoder.decode(input),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
