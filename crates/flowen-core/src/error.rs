use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowenError {
    #[error("Invalid record: {field} — {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid filter: {key} — {reason}")]
    InvalidFilter { key: String, reason: String },

    #[error("Unknown field: {0}")]
    InvalidField(String),

    #[error("Column '{0}' is not present in any row")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for FlowenError {
    fn from(e: csv::Error) -> Self {
        FlowenError::Csv(e.to_string())
    }
}
