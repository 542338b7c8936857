use chrono::{Local, NaiveDate};

/// The day before `today`, the usual reference date for freshness checks.
pub fn previous_day(today: NaiveDate) -> Option<NaiveDate> {
    today.pred_opt()
}

/// Yesterday in the local timezone. Meant for callers; nothing in this crate reads
/// the clock on its own.
pub fn yesterday() -> Option<NaiveDate> {
    previous_day(Local::now().date_naive())
}
