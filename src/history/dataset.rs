//! Historical daily data for a resolved station, reconciled with the station metadata
//! the provider ships alongside it.

use crate::climate_stations::LatLon;
use crate::directory::site_list::parse_coordinate;
use crate::history::error::HistoryError;
use crate::stations::error::FetchError;
use crate::types::station::StationId;
use log::{info, warn};
use polars::prelude::*;
use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use tokio::task;

/// Fetches one year of historical data for a station.
///
/// Implementations own the transport; the dataset comes back as provider metadata
/// plus the raw CSV body.
pub trait HistoryFetcher {
    fn fetch_history(
        &self,
        station: StationId,
        year: i32,
    ) -> impl Future<Output = Result<HistoricalDataset, FetchError>> + Send;
}

/// A historical dataset as delivered by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalDataset {
    /// Metadata entries such as `name`, `climate_identifier`, `latitude`, `longitude`.
    pub metadata: HashMap<String, String>,
    /// CSV body with a header row.
    pub csv: Vec<u8>,
}

/// Identity of the station a historical dataset belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMetadata {
    pub name: String,
    pub climate_identifier: String,
    pub location: LatLon,
}

impl StationMetadata {
    pub fn from_entries(
        station: StationId,
        entries: &HashMap<String, String>,
    ) -> Result<Self, HistoryError> {
        let field = |name: &str| {
            entries
                .get(name)
                .map(|v| v.trim().to_string())
                .ok_or_else(|| HistoryError::MissingMetadata {
                    station,
                    field: name.to_string(),
                })
        };
        let coordinate = |name: &str| {
            let value = field(name)?;
            parse_coordinate(&value).ok_or(HistoryError::InvalidCoordinate {
                station,
                field: name.to_string(),
                value,
            })
        };

        Ok(Self {
            name: field("name")?,
            climate_identifier: field("climate_identifier")?,
            location: LatLon(coordinate("latitude")?, coordinate("longitude")?),
        })
    }
}

/// The historical records of a station together with its metadata.
#[derive(Debug, Clone)]
pub struct StationHistory {
    pub station: StationId,
    pub year: i32,
    pub metadata: StationMetadata,
    pub frame: DataFrame,
}

impl StationHistory {
    /// Validates the metadata and parses the CSV body on a blocking task.
    pub async fn from_dataset(
        station: StationId,
        year: i32,
        dataset: HistoricalDataset,
    ) -> Result<Self, HistoryError> {
        let metadata = StationMetadata::from_entries(station, &dataset.metadata)?;
        let csv = dataset.csv;

        let frame = task::spawn_blocking(move || {
            CsvReadOptions::default()
                .with_has_header(true)
                .into_reader_with_file_handle(Cursor::new(csv))
                .finish()
                .map_err(|e| HistoryError::CsvParse { station, source: e })
        })
        .await??;

        if frame.height() == 0 {
            warn!("Historical data for station {} in {} is empty", station, year);
        } else {
            info!(
                "Loaded {} historical rows for station {} ({}) in {}",
                frame.height(),
                station,
                metadata.name,
                year
            );
        }

        Ok(Self {
            station,
            year,
            metadata,
            frame,
        })
    }
}
