use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinancialReportError {
    #[error("No monthly records provided for organization: {0}")]
    EmptyDataset(String),

    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Duplicate record for month {0}")]
    DuplicateMonth(u32),

    #[error("Negative {field} ({value}) in month {month}: amounts must be non-negative")]
    NegativeAmount {
        month: u32,
        field: String,
        value: f64,
    },

    #[error("Table parse error on line {line}: {details}")]
    TableParseError { line: usize, details: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "ollama")]
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[cfg(feature = "ollama")]
    #[error("Could not reach the Ollama server: {0}")]
    LlmUnavailable(String),

    #[cfg(feature = "ollama")]
    #[error("Ollama API error (status {status}): {body}")]
    LlmApiError { status: u16, body: String },

    #[cfg(feature = "ollama")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FinancialReportError>;
