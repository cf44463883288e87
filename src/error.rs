use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid building dictionary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source unreachable: {0}")]
    SourceUnreachable(String),

    #[error("Schema mismatch in {layout} source: missing column '{column}'")]
    SchemaMismatch { layout: String, column: String },

    #[error("Unsupported source layout: {0}")]
    UnsupportedLayout(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SchedError>;
