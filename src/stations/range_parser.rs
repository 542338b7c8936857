use crate::types::station::DateRange;
use chrono::NaiveDate;

const RANGE_SEPARATOR: char = '|';
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes a provider coverage range of the form `"<start>|<end>"`.
///
/// Only the first `|` splits; anything after it belongs to the end side. A side that
/// is empty or not a `YYYY-MM-DD` date comes back as `None`, as do both sides when the
/// string has no separator or when the start lies after the end. This never fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_station::parse_range;
///
/// let range = parse_range("2024-02-01|not-a-date");
/// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 1));
/// assert_eq!(range.end, None);
/// ```
pub fn parse_range(range: &str) -> DateRange {
    let Some((start, end)) = range.split_once(RANGE_SEPARATOR) else {
        return DateRange::default();
    };

    let start = parse_date(start);
    let end = parse_date(end);

    match (start, end) {
        (Some(s), Some(e)) if s > e => DateRange::default(),
        _ => DateRange::new(start, end),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_well_formed_range() {
        let range = parse_range("2024-02-01|2024-02-08");
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 8));
        assert_eq!(range.encode(), "2024-02-01|2024-02-08");
    }

    #[test]
    fn test_no_separator_is_absent() {
        assert_eq!(parse_range("garbage"), DateRange::default());
        assert_eq!(parse_range("2024-02-01"), DateRange::default());
        assert_eq!(parse_range(""), DateRange::default());
    }

    #[test]
    fn test_unparsable_side_degrades_alone() {
        let range = parse_range("2024-02-01|not-a-date");
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, None);

        let range = parse_range("yesterday|2024-02-08");
        assert_eq!(range.start, None);
        assert_eq!(range.end, date(2024, 2, 8));
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(parse_range("|"), DateRange::default());
        let range = parse_range("|2024-02-08");
        assert_eq!(range.start, None);
        assert_eq!(range.end, date(2024, 2, 8));
        let range = parse_range("1994-01-01|");
        assert_eq!(range.start, date(1994, 1, 1));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_only_first_separator_splits() {
        // The end side becomes "2024-02-08|2024-03-01", which is not a date.
        let range = parse_range("2024-02-01|2024-02-08|2024-03-01");
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_invalid_calendar_dates() {
        let range = parse_range("2023-02-29|2023-13-01");
        assert!(range.is_empty());
        let range = parse_range("2024-02-29|2024-03-01");
        assert_eq!(range.start, date(2024, 2, 29));
    }

    #[test]
    fn test_inverted_range_is_absent() {
        assert!(parse_range("2024-02-08|2024-02-01").is_empty());
        let same_day = parse_range("2024-02-08|2024-02-08");
        assert_eq!(same_day.start, same_day.end);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let range = parse_range(" 2024-02-01 | 2024-02-08\n");
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 8));
    }

    #[test]
    fn test_reencoding_reproduces_parsed_range() {
        for input in ["2001-05-01|2024-02-08", "|2024-02-08", "1990-01-01|", "|"] {
            let range = parse_range(input);
            assert_eq!(parse_range(&range.encode()), range, "input {}", input);
        }
    }
}
