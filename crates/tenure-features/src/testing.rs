//! Shared builders for in-memory raw frames used across unit tests.

use chrono::NaiveDate;
use polars::prelude::*;
use tenure::dates::days_from_date;
use tenure::schema;

/// Shorthand date constructor for tests.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Build a raw monthly panel from
/// `(emp_id, month, joined, last_working_date, salary, business_value)`
/// tuples, with date columns in the `Date` dtype.
pub(crate) fn raw_frame(
    rows: &[(i64, NaiveDate, NaiveDate, Option<NaiveDate>, f64, f64)],
) -> DataFrame {
    let emp_ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
    let months: Vec<i32> = rows.iter().map(|r| days_from_date(r.1)).collect();
    let joined: Vec<i32> = rows.iter().map(|r| days_from_date(r.2)).collect();
    let last_working: Vec<Option<i32>> = rows.iter().map(|r| r.3.map(days_from_date)).collect();
    let salaries: Vec<f64> = rows.iter().map(|r| r.4).collect();
    let business_values: Vec<f64> = rows.iter().map(|r| r.5).collect();

    DataFrame::new(vec![
        Series::new(schema::EMP_ID.into(), emp_ids).into(),
        Series::new(schema::MONTH.into(), months)
            .cast(&DataType::Date)
            .expect("date cast")
            .into(),
        Series::new(schema::DATE_OF_JOINING.into(), joined)
            .cast(&DataType::Date)
            .expect("date cast")
            .into(),
        Series::new(schema::LAST_WORKING_DATE.into(), last_working)
            .cast(&DataType::Date)
            .expect("date cast")
            .into(),
        Series::new(schema::SALARY.into(), salaries).into(),
        Series::new(schema::TOTAL_BUSINESS_VALUE.into(), business_values).into(),
    ])
    .expect("valid test frame")
}
