use crate::types::station::{NormalizedStationRecord, StationId};
use chrono::NaiveDate;
use log::debug;
use ordered_float::OrderedFloat;

/// Returns the stations whose daily records end exactly on `reference_date`, nearest
/// first.
///
/// A station whose latest daily record is older (or missing) is stale and left out,
/// however close it is. Equal proximities keep their input order. NaN proximities
/// sort after every number.
pub fn rank_candidates(
    records: &[NormalizedStationRecord],
    reference_date: NaiveDate,
) -> Vec<&NormalizedStationRecord> {
    let mut fresh: Vec<&NormalizedStationRecord> = records
        .iter()
        .filter(|record| record.is_fresh_on(reference_date))
        .collect();

    // `sort_by_key` is stable, which is the tie-break.
    fresh.sort_by_key(|record| OrderedFloat(record.proximity));
    fresh
}

/// Picks the nearest station with daily records through `reference_date`.
///
/// Returns `None` when no candidate is fresh. That is an expected outcome, not an error.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_station::{normalize, select, RawStationRecord, StationId};
///
/// let records = [(1, 12.0, "2001-01-01|2024-02-07"), (2, 5.0, "2001-01-01|2024-02-08")]
///     .into_iter()
///     .map(|(id, proximity, daily)| {
///         normalize(RawStationRecord {
///             id: StationId(id),
///             name: None,
///             province: None,
///             proximity,
///             hourly_range: String::new(),
///             daily_range: daily.to_string(),
///             monthly_range: String::new(),
///         })
///     })
///     .collect::<Vec<_>>();
///
/// let yesterday = NaiveDate::from_ymd_opt(2024, 2, 8).unwrap();
/// assert_eq!(select(&records, yesterday), Some(StationId(2)));
/// ```
pub fn select(records: &[NormalizedStationRecord], reference_date: NaiveDate) -> Option<StationId> {
    let ranked = rank_candidates(records, reference_date);
    match ranked.first() {
        Some(best) => {
            debug!(
                "Selected station {} at {} km out of {} fresh candidates ({} total)",
                best.id,
                best.proximity,
                ranked.len(),
                records.len()
            );
            Some(best.id)
        }
        None => {
            debug!(
                "None of {} candidates has daily data through {}",
                records.len(),
                reference_date
            );
            None
        }
    }
}
