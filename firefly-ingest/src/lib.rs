//! firefly-ingest: bank statement parsers (text, CSV, OFX, spreadsheet grids)
//! producing flat tables ready for Firefly III CSV import.

pub mod converter;
pub mod error;
pub mod number;
pub mod parsers;
pub mod types;

pub use converter::{ConverterKind, StatementInput};
pub use error::IngestError;
pub use number::normalize_number;
pub use types::{Cell, ConvertedTable, OutputFormat, Quoting};
