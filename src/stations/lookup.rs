use crate::climate_stations::LatLon;
use crate::stations::error::FetchError;
use crate::stations::normalize::normalize_all;
use crate::stations::resolver::select;
use crate::types::station::{RawStationRecord, StationId};
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use std::future::Future;

/// Search radius used when the caller does not set one.
pub const DEFAULT_RADIUS_KM: f64 = 25.0;
/// Number of candidate stations requested when the caller does not set one.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Searches the provider for climate stations around a coordinate.
///
/// Implementations own transport, timeouts and retries. They may return anywhere
/// between zero and `limit` records, each with its distance from `location`.
///
/// Any `Fn(LatLon, f64, usize) -> impl Future<Output = Result<Vec<RawStationRecord>, FetchError>>`
/// closure is a `DirectoryFetcher`.
pub trait DirectoryFetcher {
    fn fetch(
        &self,
        location: LatLon,
        radius_km: f64,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawStationRecord>, FetchError>> + Send;
}

impl<Func, Fut> DirectoryFetcher for Func
where
    Func: Fn(LatLon, f64, usize) -> Fut,
    Fut: Future<Output = Result<Vec<RawStationRecord>, FetchError>> + Send,
{
    fn fetch(
        &self,
        location: LatLon,
        radius_km: f64,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawStationRecord>, FetchError>> + Send {
        self(location, radius_km, limit)
    }
}

/// Finds the nearest station around `location` whose daily records run through
/// `reference_date`.
///
/// Calls `fetcher` exactly once. A fetch failure is returned as is; `Ok(None)` means
/// the search succeeded but no candidate was fresh. The radius is never widened.
pub async fn lookup_station<F>(
    fetcher: &F,
    location: LatLon,
    radius_km: f64,
    limit: usize,
    reference_date: NaiveDate,
) -> Result<Option<StationId>, FetchError>
where
    F: DirectoryFetcher + ?Sized,
{
    let raw = fetcher.fetch(location, radius_km, limit).await?;
    if raw.len() > limit {
        warn!(
            "Station search returned {} records, more than the requested {}",
            raw.len(),
            limit
        );
    }

    let records = normalize_all(raw);
    let selected = select(&records, reference_date);
    info!(
        "Station lookup at ({}, {}) within {} km: {} candidates, selected {:?}",
        location.0,
        location.1,
        radius_km,
        records.len(),
        selected.map(StationId::get)
    );
    Ok(selected)
}

/// Resolves stations through an injected [`DirectoryFetcher`].
///
/// Holds no state besides the fetcher; every lookup takes its full context as
/// arguments.
///
/// # Examples
///
/// ```
/// # use climate_station::{FetchError, LatLon, RawStationRecord, StationId, StationLookup};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), FetchError> {
/// let lookup = StationLookup::new(|_at: LatLon, _radius: f64, _limit: usize| async {
///     Ok::<_, FetchError>(vec![RawStationRecord {
///         id: StationId(6526),
///         name: None,
///         province: Some("PE".into()),
///         proximity: 3.1,
///         hourly_range: String::new(),
///         daily_range: "1943-01-01|2024-02-08".into(),
///         monthly_range: String::new(),
///     }])
/// });
///
/// let station = lookup
///     .lookup()
///     .location(LatLon(46.29, -63.13))
///     .reference_date(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap())
///     .call()
///     .await?;
/// assert_eq!(station, Some(StationId(6526)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StationLookup<F> {
    fetcher: F,
}

#[bon]
impl<F: DirectoryFetcher> StationLookup<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Finds the nearest fresh station around a location.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Point to search around.
    /// * `.reference_date(NaiveDate)`: **Required.** Date the station's daily records must end on, usually yesterday.
    /// * `.radius_km(f64)`: Optional. Search radius. Defaults to `25.0`.
    /// * `.limit(usize)`: Optional. Maximum number of candidates to request. Defaults to `10`.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's [`FetchError`] unchanged.
    #[builder]
    pub async fn lookup(
        &self,
        location: LatLon,
        reference_date: NaiveDate,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Option<StationId>, FetchError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        let limit = limit.unwrap_or(DEFAULT_CANDIDATE_LIMIT);
        lookup_station(&self.fetcher, location, radius_km, limit, reference_date).await
    }
}
