use crate::types::station::StationId;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Historical metadata for station {station} has no '{field}' entry")]
    MissingMetadata { station: StationId, field: String },

    #[error("Historical metadata for station {station} has an invalid {field} '{value}'")]
    InvalidCoordinate {
        station: StationId,
        field: String,
        value: String,
    },

    #[error("Parsing error processing historical CSV for station {station}")]
    CsvParse {
        station: StationId,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
