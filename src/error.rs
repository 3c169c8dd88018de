use arrow_schema::ArrowError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Missing Field: {0}")]
    MissingField(String),
    #[error("Empty Input: cannot summarize {0} over zero days")]
    EmptyInput(String),
    #[error("Invalid Numeric: field '{field}' has non-numeric value {value}")]
    InvalidNumeric { field: String, value: String },
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet Error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow Error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("Data Error: {0}")]
    Data(String),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("XML Error: {0}")]
    Xml(#[from] xml::reader::Error),
}

impl PipelineError {
    pub(crate) fn invalid_numeric(field: &str, value: impl ToString) -> Self {
        Self::InvalidNumeric {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
