use crate::stations::range_parser::parse_range;
use crate::types::station::{DateRange, NormalizedStationRecord, RawStationRecord};
use log::debug;

/// Decodes the hourly, daily and monthly coverage ranges of a search result into
/// typed dates. All other fields pass through unchanged.
pub fn normalize(raw: RawStationRecord) -> NormalizedStationRecord {
    let hourly = decode(&raw, "hourly", &raw.hourly_range);
    let daily = decode(&raw, "daily", &raw.daily_range);
    let monthly = decode(&raw, "monthly", &raw.monthly_range);

    NormalizedStationRecord {
        id: raw.id,
        name: raw.name,
        province: raw.province,
        proximity: raw.proximity,
        hourly_start: hourly.start,
        hourly_end: hourly.end,
        daily_start: daily.start,
        daily_end: daily.end,
        monthly_start: monthly.start,
        monthly_end: monthly.end,
    }
}

/// Normalizes a batch of search results, keeping their order. Sparse records never
/// fail the batch; their missing ranges are simply absent.
pub fn normalize_all<I>(records: I) -> Vec<NormalizedStationRecord>
where
    I: IntoIterator<Item = RawStationRecord>,
{
    records.into_iter().map(normalize).collect()
}

fn decode(raw: &RawStationRecord, cadence: &str, encoded: &str) -> DateRange {
    let range = parse_range(encoded);
    if range.is_empty() && !encoded.trim().is_empty() {
        debug!(
            "Station {}: unreadable {} range '{}', treating as no coverage",
            raw.id, cadence, encoded
        );
    }
    range
}

impl From<RawStationRecord> for NormalizedStationRecord {
    fn from(raw: RawStationRecord) -> Self {
        normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::station::StationId;
    use chrono::NaiveDate;
    use serde_json::json;

    fn raw(id: u64, hourly: &str, daily: &str, monthly: &str) -> RawStationRecord {
        RawStationRecord {
            id: StationId(id),
            name: Some(format!("STATION {}", id)),
            province: Some("PE".to_string()),
            proximity: 7.5,
            hourly_range: hourly.to_string(),
            daily_range: daily.to_string(),
            monthly_range: monthly.to_string(),
        }
    }

    #[test]
    fn test_normalize_full_record() {
        let record = normalize(raw(
            6526,
            "1994-02-01|2024-02-08",
            "1943-01-01|2024-02-07",
            "1943-01-01|2007-02-01",
        ));
        assert_eq!(record.id, StationId(6526));
        assert_eq!(record.name.as_deref(), Some("STATION 6526"));
        assert_eq!(record.province.as_deref(), Some("PE"));
        assert_eq!(record.proximity, 7.5);
        assert_eq!(record.hourly_start, NaiveDate::from_ymd_opt(1994, 2, 1));
        assert_eq!(record.hourly_end, NaiveDate::from_ymd_opt(2024, 2, 8));
        assert_eq!(record.daily_start, NaiveDate::from_ymd_opt(1943, 1, 1));
        assert_eq!(record.daily_end, NaiveDate::from_ymd_opt(2024, 2, 7));
        assert_eq!(record.monthly_start, NaiveDate::from_ymd_opt(1943, 1, 1));
        assert_eq!(record.monthly_end, NaiveDate::from_ymd_opt(2007, 2, 1));
    }

    #[test]
    fn test_normalized_shape_has_no_range_strings() {
        let record = normalize(raw(1, "|", "2020-01-01|2024-02-08", ""));
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        for key in ["hourly_range", "daily_range", "monthly_range", "hlyRange", "dlyRange", "mlyRange"] {
            assert!(!object.contains_key(key), "unexpected field {}", key);
        }
        assert_eq!(object["daily_end"], json!("2024-02-08"));
        assert_eq!(object["hourly_start"], json!(null));
    }

    #[test]
    fn test_mixed_batch_keeps_order() {
        let batch = vec![
            raw(1, "2001-01-01|2024-02-08", "2001-01-01|2024-02-08", "2001-01-01|2006-12-01"),
            raw(2, "", "", ""),
            raw(3, "junk", "2010-06-01|", "|"),
        ];
        let records = normalize_all(batch);
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.id.get()).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert!(records[1].daily().is_empty());
        assert!(records[1].hourly().is_empty());
        assert!(records[2].hourly().is_empty());
        assert_eq!(records[2].daily_start, NaiveDate::from_ymd_opt(2010, 6, 1));
        assert_eq!(records[2].daily_end, None);
    }

    #[test]
    fn test_normalize_after_reencoding_is_stable() {
        let first = normalize(raw(
            9,
            "2003-10-01|2024-02-08",
            "not|dates",
            "|1999-12-01",
        ));
        let second = normalize(first.to_raw());
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_impl_matches_normalize() {
        let r = raw(4, "", "2020-01-01|2024-02-08", "");
        assert_eq!(NormalizedStationRecord::from(r.clone()), normalize(r));
    }
}
