//! Defines the data structures for candidate climate stations as returned by the
//! provider's station search, and their normalized form with typed date coverage.

use chrono::NaiveDate;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Identifiers ---

/// The provider-assigned identifier of a climate station (e.g. `51459`).
///
/// The provider sends it either as a JSON number or as a numeric string; both decode
/// to the same integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl StationId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(StationId)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Number(u64),
            Text(String),
        }

        match WireId::deserialize(deserializer)? {
            WireId::Number(n) => Ok(StationId(n)),
            WireId::Text(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid station id '{}'", s))),
        }
    }
}

// --- Ranges ---

/// A date coverage range with optional start and end dates.
///
/// An absent side means the provider reported no coverage (or an unreadable date)
/// for it. Absence is never encoded as a sentinel date.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    /// The earliest date with data, if known.
    pub start: Option<NaiveDate>,
    /// The latest date with data, if known.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns `true` if neither side is known.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Re-encodes the range in the provider's `"start|end"` form.
    /// An absent side becomes an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use climate_station::DateRange;
    ///
    /// let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 2, 1), None);
    /// assert_eq!(range.encode(), "2024-02-01|");
    /// ```
    pub fn encode(&self) -> String {
        let side = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        format!("{}|{}", side(self.start), side(self.end))
    }
}

// --- Records ---

/// One candidate station near a query coordinate, exactly as the station search
/// returned it.
///
/// The three range fields use the provider's combined `"<start>|<end>"` encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStationRecord {
    /// Provider station identifier.
    pub id: StationId,
    /// Station name, when the search result carries one.
    #[serde(default)]
    pub name: Option<String>,
    /// Province code (e.g. "ON"), when the search result carries one.
    #[serde(default, rename = "prov")]
    pub province: Option<String>,
    /// Distance in kilometers from the query coordinate, as computed by the provider.
    pub proximity: f64,
    #[serde(default, rename = "hlyRange", deserialize_with = "null_as_empty")]
    pub hourly_range: String,
    #[serde(default, rename = "dlyRange", deserialize_with = "null_as_empty")]
    pub daily_range: String,
    #[serde(default, rename = "mlyRange", deserialize_with = "null_as_empty")]
    pub monthly_range: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A candidate station with its coverage ranges decoded into typed dates.
///
/// Produced by [`crate::normalize`]. The raw range strings are not part of this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedStationRecord {
    pub id: StationId,
    pub name: Option<String>,
    pub province: Option<String>,
    /// Distance in kilometers from the query coordinate.
    pub proximity: f64,
    pub hourly_start: Option<NaiveDate>,
    pub hourly_end: Option<NaiveDate>,
    pub daily_start: Option<NaiveDate>,
    pub daily_end: Option<NaiveDate>,
    pub monthly_start: Option<NaiveDate>,
    pub monthly_end: Option<NaiveDate>,
}

impl NormalizedStationRecord {
    pub fn hourly(&self) -> DateRange {
        DateRange::new(self.hourly_start, self.hourly_end)
    }

    pub fn daily(&self) -> DateRange {
        DateRange::new(self.daily_start, self.daily_end)
    }

    pub fn monthly(&self) -> DateRange {
        DateRange::new(self.monthly_start, self.monthly_end)
    }

    /// Returns `true` if the station's most recent daily record is exactly `reference_date`.
    pub fn is_fresh_on(&self, reference_date: NaiveDate) -> bool {
        self.daily_end == Some(reference_date)
    }

    /// Re-encodes this record in the provider's wire shape.
    pub fn to_raw(&self) -> RawStationRecord {
        RawStationRecord {
            id: self.id,
            name: self.name.clone(),
            province: self.province.clone(),
            proximity: self.proximity,
            hourly_range: self.hourly().encode(),
            daily_range: self.daily().encode(),
            monthly_range: self.monthly().encode(),
        }
    }
}

// --- Search payload ---

/// The body of a station search response.
///
/// The provider keys results by station name (`{"Toronto City": {...}, ...}`); a plain
/// JSON array of records is accepted as well. Entry order is preserved in both cases,
/// since it is the tie-break order for equally distant stations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationSearchResults(pub Vec<RawStationRecord>);

impl StationSearchResults {
    pub fn into_records(self) -> Vec<RawStationRecord> {
        self.0
    }
}

impl<'de> Deserialize<'de> for StationSearchResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = StationSearchResults;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of stations or a map of station name to station")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(record) = seq.next_element::<RawStationRecord>()? {
                    records.push(record);
                }
                Ok(StationSearchResults(records))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, mut record)) = map.next_entry::<String, RawStationRecord>()? {
                    if record.name.is_none() {
                        record.name = Some(name);
                    }
                    records.push(record);
                }
                Ok(StationSearchResults(records))
            }
        }

        deserializer.deserialize_any(ResultsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_station_id_from_number_or_string() {
        let a: StationId = serde_json::from_value(json!(51459)).unwrap();
        let b: StationId = serde_json::from_value(json!("51459")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(), 51459);
        assert!(serde_json::from_value::<StationId>(json!("s0000430")).is_err());
    }

    #[test]
    fn test_raw_record_wire_names_and_nulls() {
        let raw: RawStationRecord = serde_json::from_value(json!({
            "id": "48549",
            "prov": "ON",
            "proximity": 4.2,
            "hlyRange": "2009-12-10|2024-02-08",
            "dlyRange": null,
        }))
        .unwrap();
        assert_eq!(raw.id, StationId(48549));
        assert_eq!(raw.province.as_deref(), Some("ON"));
        assert_eq!(raw.hourly_range, "2009-12-10|2024-02-08");
        assert_eq!(raw.daily_range, "");
        assert_eq!(raw.monthly_range, "");
        assert!(raw.name.is_none());
    }

    #[test]
    fn test_search_results_keep_provider_order() {
        let body = r#"{
            "ZULU STATION": {"id": 3, "proximity": 1.0, "dlyRange": ""},
            "ALPHA STATION": {"id": 1, "proximity": 1.0, "dlyRange": ""}
        }"#;
        let results: StationSearchResults = serde_json::from_str(body).unwrap();
        let ids: Vec<_> = results.0.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, [3, 1]);
        assert_eq!(results.0[0].name.as_deref(), Some("ZULU STATION"));
    }

    #[test]
    fn test_search_results_from_list() {
        let body = r#"[{"id": 7, "name": "A", "proximity": 0.5}]"#;
        let records = serde_json::from_str::<StationSearchResults>(body)
            .unwrap()
            .into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("A"));
    }

    #[test]
    fn test_date_range_encode_absent_sides() {
        assert_eq!(DateRange::default().encode(), "|");
        let end = NaiveDate::from_ymd_opt(2024, 2, 8);
        assert_eq!(DateRange::new(None, end).encode(), "|2024-02-08");
        assert!(DateRange::default().is_empty());
    }
}
