//! Conversion of the string date columns to the `Date` dtype.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use tenure::dates::days_from_date;
use tenure::schema;

/// Date format used by the spreadsheet.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert the three string date columns to typed dates in place.
///
/// Nulls and empty strings stay null (an employee without a
/// `LastWorkingDate` has simply not departed); any other value that is
/// not a `YYYY-MM-DD` date fails with the column and offending value.
pub fn normalize_dates(df: &mut DataFrame) -> Result<()> {
    for column in schema::DATE_COLUMNS {
        let parsed = parse_date_column(df, column)?;
        df.with_column(parsed)?;
    }
    Ok(())
}

fn parse_date_column(df: &DataFrame, column: &str) -> Result<Series> {
    let values = df.column(column)?.str()?;
    let mut days: Vec<Option<i32>> = Vec::with_capacity(values.len());

    for value in values {
        match value {
            None => days.push(None),
            Some(s) if s.is_empty() => days.push(None),
            Some(s) => {
                let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
                    DataError::DateParse {
                        column: column.to_string(),
                        value: s.to_string(),
                    }
                })?;
                days.push(Some(days_from_date(date)));
            }
        }
    }

    Ok(Series::new(column.into(), days).cast(&DataType::Date)?)
}
