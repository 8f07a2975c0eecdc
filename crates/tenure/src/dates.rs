//! Conversions between calendar dates and the physical representation
//! of the polars `Date` dtype (days since the Unix epoch).

use chrono::NaiveDate;

fn unix_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date")
}

/// Days since the Unix epoch for a calendar date.
pub fn days_from_date(date: NaiveDate) -> i32 {
    (date - unix_epoch()).num_days() as i32
}

/// Calendar date for a days-since-epoch value.
pub fn date_from_days(days: i32) -> NaiveDate {
    unix_epoch() + chrono::Duration::days(i64::from(days))
}
