//! XML account decoder
//!
//! Input is a single root element whose children each describe one account
//! through the sub-elements `ID`, `Name` and `Balance`:
//!
//! ```xml
//! <Accounts>
//!     <Account>
//!         <ID>55555555-5555-5555-5555-555555555555</ID>
//!         <Name>Account 5</Name>
//!         <Balance>2000.00</Balance>
//!     </Account>
//! </Accounts>
//! ```
//!
//! Element names of the root and of the children are not checked. Text is
//! trimmed; an empty field element yields an empty string. When a field
//! appears twice the first occurrence wins.

use crate::io::format::AccountDecoder;
use crate::types::{LedgerError, RawAccountRecord};
use quick_xml::events::Event;
use quick_xml::Reader;

const FORMAT: &str = "XML";

// Element depth once inside each level.
const ROOT_DEPTH: usize = 1;
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Name,
    Balance,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"ID" => Some(Field::Id),
            b"Name" => Some(Field::Name),
            b"Balance" => Some(Field::Balance),
            _ => None,
        }
    }
}

/// Fields collected so far for the record being read
#[derive(Debug, Default)]
struct PartialRecord {
    id: Option<String>,
    name: Option<String>,
    balance: Option<String>,
}

impl PartialRecord {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Balance => &mut self.balance,
        }
    }

    /// Open a field for text; returns false if it was already filled
    fn open(&mut self, field: Field) -> bool {
        let slot = self.slot(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(String::new());
        true
    }

    fn push_text(&mut self, field: Field, text: &str) {
        if let Some(value) = self.slot(field) {
            value.push_str(text);
        }
    }

    fn finish(self, line: u64) -> Result<RawAccountRecord, LedgerError> {
        let missing = |name: &str| {
            LedgerError::format(
                FORMAT,
                Some(line),
                format!("account element has no <{}> element", name),
            )
        };
        Ok(RawAccountRecord {
            id: self.id.ok_or_else(|| missing("ID"))?,
            name: self.name.ok_or_else(|| missing("Name"))?,
            balance: self.balance.ok_or_else(|| missing("Balance"))?,
        })
    }
}

struct XmlParser<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    depth: usize,
    seen_root: bool,
    current: Option<PartialRecord>,
    field: Option<Field>,
    records: Vec<RawAccountRecord>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);
        XmlParser {
            source,
            reader,
            depth: 0,
            seen_root: false,
            current: None,
            field: None,
            records: Vec::new(),
        }
    }

    fn line(&self) -> u64 {
        let offset = (self.reader.buffer_position() as usize).min(self.source.len());
        self.source.as_bytes()[..offset]
            .iter()
            .filter(|b| **b == b'\n')
            .count() as u64
            + 1
    }

    fn error(&self, message: impl Into<String>) -> LedgerError {
        LedgerError::format(FORMAT, Some(self.line()), message)
    }

    fn run(mut self) -> Result<Vec<RawAccountRecord>, LedgerError> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.error(e.to_string())),
            };
            match event {
                Event::Start(element) => {
                    let tag = element.local_name().as_ref().to_vec();
                    self.open_element(&tag)?;
                }
                Event::Empty(element) => {
                    let tag = element.local_name().as_ref().to_vec();
                    self.open_element(&tag)?;
                    self.close_element()?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| self.error(e.to_string()))?;
                    if self.depth == 0 && !text.trim().is_empty() {
                        return Err(self.error("text outside the root element"));
                    }
                    self.push_text(&text);
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| self.error(e.to_string()))?;
                    self.push_text(text);
                }
                Event::End(_) => self.close_element()?,
                Event::Eof => break,
                _ => {}
            }
        }

        if self.depth != 0 {
            return Err(self.error("unexpected end of document"));
        }
        if !self.seen_root {
            return Err(self.error("document has no root element"));
        }
        Ok(self.records)
    }

    fn open_element(&mut self, tag: &[u8]) -> Result<(), LedgerError> {
        if self.depth == 0 && self.seen_root {
            return Err(self.error("content after the root element"));
        }
        self.depth += 1;
        match self.depth {
            ROOT_DEPTH => self.seen_root = true,
            RECORD_DEPTH => self.current = Some(PartialRecord::default()),
            FIELD_DEPTH => {
                self.field = match (Field::from_tag(tag), self.current.as_mut()) {
                    (Some(field), Some(record)) => record.open(field).then_some(field),
                    _ => None,
                };
            }
            _ => {}
        }
        Ok(())
    }

    fn close_element(&mut self) -> Result<(), LedgerError> {
        match self.depth {
            FIELD_DEPTH => self.field = None,
            RECORD_DEPTH => {
                if let Some(partial) = self.current.take() {
                    let record = partial.finish(self.line())?;
                    self.records.push(record);
                }
            }
            _ => {}
        }
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if self.depth != FIELD_DEPTH {
            return;
        }
        if let (Some(field), Some(record)) = (self.field, self.current.as_mut()) {
            record.push_text(field, text);
        }
    }
}

impl AccountDecoder for XmlDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<RawAccountRecord>, LedgerError> {
        let source = std::str::from_utf8(input)
            .map_err(|e| LedgerError::format(FORMAT, None, e.to_string()))?;
        XmlParser::new(source).run()
    }
}
