//! I/O module
//!
//! Handles import file decoding and listing output.
//!
//! # Components
//!
//! - `format` - Format selection by file extension and the decoder trait
//! - `csv_decoder`, `json_decoder`, `xml_decoder` - One decoder per format
//! - `output` - Account listing serialization (CSV, JSON)

pub mod csv_decoder;
pub mod format;
pub mod json_decoder;
pub mod output;
pub mod xml_decoder;

pub use csv_decoder::CsvDecoder;
pub use format::{AccountDecoder, ImportFormat};
pub use json_decoder::JsonDecoder;
pub use output::{write_accounts_csv, write_accounts_json};
pub use xml_decoder::XmlDecoder;
