use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to parse site list CSV")]
    CsvParse(#[source] PolarsError),

    #[error("Site list is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unknown province code '{0}'")]
    UnknownProvince(String),
}
