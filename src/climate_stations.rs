//! This module provides the main entry point of the crate. It resolves the nearest
//! climate station with up-to-date daily records for a location, and fetches that
//! station's historical data through injected provider collaborators.

use crate::directory::site_list::DirectorySite;
use crate::error::ClimateStationError;
use crate::history::dataset::{HistoryFetcher, StationHistory};
use crate::stations::lookup::{DirectoryFetcher, StationLookup};
use crate::types::station::StationId;
use bon::bon;
use chrono::{Datelike, NaiveDate};
use log::info;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use climate_station::LatLon;
///
/// let charlottetown = LatLon(46.24, -63.13);
/// assert_eq!(charlottetown.0, 46.24); // Latitude
/// assert_eq!(charlottetown.1, -63.13); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client for resolving climate stations and loading their history.
///
/// It owns no network code. The station search and the historical dataset download
/// are provided by the caller as a [`DirectoryFetcher`] and a [`HistoryFetcher`].
/// Every call takes its reference date explicitly, so results do not depend on the
/// wall clock.
pub struct ClimateStations<D, H> {
    lookup: StationLookup<D>,
    history: H,
}

#[bon]
impl<D, H> ClimateStations<D, H>
where
    D: DirectoryFetcher,
    H: HistoryFetcher,
{
    pub fn new(directory: D, history: H) -> Self {
        Self {
            lookup: StationLookup::new(directory),
            history,
        }
    }

    /// Finds the nearest station with daily records through `reference_date`.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Point to search around.
    /// * `.reference_date(NaiveDate)`: **Required.** Usually yesterday.
    /// * `.radius_km(f64)`: Optional. Defaults to `25.0`.
    /// * `.limit(usize)`: Optional. Defaults to `10`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the search succeeded but no nearby station is fresh.
    #[builder]
    pub async fn nearest_station(
        &self,
        location: LatLon,
        reference_date: NaiveDate,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Option<StationId>, ClimateStationError> {
        Ok(self
            .lookup
            .lookup()
            .location(location)
            .reference_date(reference_date)
            .maybe_radius_km(radius_km)
            .maybe_limit(limit)
            .call()
            .await?)
    }

    /// Fetches and parses one year of history for a known station.
    #[builder]
    pub async fn history(
        &self,
        station: StationId,
        year: i32,
    ) -> Result<StationHistory, ClimateStationError> {
        let dataset = self.history.fetch_history(station, year).await?;
        Ok(StationHistory::from_dataset(station, year, dataset).await?)
    }

    /// Resolves the station nearest to a forecast site and loads its history.
    ///
    /// # Arguments
    ///
    /// * `.site(&DirectorySite)`: **Required.** The site whose position is searched around.
    /// * `.reference_date(NaiveDate)`: **Required.** Freshness date, usually yesterday.
    /// * `.year(i32)`: Optional. Year of history to load. Defaults to the reference date's year.
    /// * `.radius_km(f64)`: Optional. Defaults to `25.0`.
    /// * `.limit(usize)`: Optional. Defaults to `10`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no fresh station is near the site; the history fetcher is not
    /// called in that case.
    #[builder]
    pub async fn history_for_site(
        &self,
        site: &DirectorySite,
        reference_date: NaiveDate,
        year: Option<i32>,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Option<StationHistory>, ClimateStationError> {
        let Some(station) = self
            .nearest_station()
            .location(site.location())
            .reference_date(reference_date)
            .maybe_radius_km(radius_km)
            .maybe_limit(limit)
            .call()
            .await?
        else {
            info!(
                "No station near {} ({}) has daily data through {}",
                site.english_name,
                site.conditions_id(),
                reference_date
            );
            return Ok(None);
        };

        let year = year.unwrap_or_else(|| reference_date.year());
        let history = self.history().station(station).year(year).call().await?;
        Ok(Some(history))
    }
}
