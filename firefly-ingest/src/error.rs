use thiserror::Error;

/// Failures a converter reports about its input (as opposed to I/O).
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("required column not found: {0}")]
    MissingColumn(String),

    #[error("header row with '{0}' not found in the spreadsheet")]
    HeaderNotFound(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
