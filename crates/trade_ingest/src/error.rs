use thiserror::Error;

/// Why a single CSV row was rejected during normalization.
///
/// These never escape the batch call; they are rendered into the
/// `reason` string of a `models::RowError`.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("unrecognized date format: {0:?}")]
    BadDate(String),

    #[error("not a numeric value: {0:?}")]
    BadNumber(String),

    #[error("not an integer: {0:?}")]
    BadInteger(String),

    #[error("malformed CSV record: {0}")]
    Csv(String),
}
