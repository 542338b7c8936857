use crate::directory::error::DirectoryError;
use crate::history::error::HistoryError;
use crate::stations::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateStationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    History(#[from] HistoryError),
}
