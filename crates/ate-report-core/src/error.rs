// crates/ate-report-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("input table is missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    #[error("dictionary has {codes} variable codes but {labels} labels")]
    DictionaryLengthMismatch { codes: usize, labels: usize },

    #[error("'{label}' has a negative {side} error bar ({length})")]
    NegativeErrorBar {
        label: String,
        side: &'static str,
        length: f64,
    },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
