//! Point-in-time window filtering of the monthly panel.

use crate::error::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use tenure::dates::days_from_date;
use tenure::schema;

/// Expression for a calendar date literal of `Date` dtype.
pub(crate) fn date_expr(date: NaiveDate) -> Expr {
    lit(days_from_date(date)).cast(DataType::Date)
}

/// Restrict the panel to what was knowable as of `end_date`.
///
/// Keeps rows with `MMM-YY <= end_date` and `Dateofjoining < end_date`,
/// and censors any `LastWorkingDate >= end_date` to null: at that point
/// in time the employee had not yet departed. The input frame is never
/// mutated, and re-filtering at the same cutoff is a no-op.
pub fn filter_before(df: &DataFrame, end_date: NaiveDate) -> Result<DataFrame> {
    let cutoff = date_expr(end_date);

    let filtered = df
        .clone()
        .lazy()
        .filter(
            col(schema::MONTH)
                .lt_eq(cutoff.clone())
                .and(col(schema::DATE_OF_JOINING).lt(cutoff.clone())),
        )
        .with_column(
            when(col(schema::LAST_WORKING_DATE).gt_eq(cutoff))
                .then(lit(NULL).cast(DataType::Date))
                .otherwise(col(schema::LAST_WORKING_DATE))
                .alias(schema::LAST_WORKING_DATE),
        )
        .collect()?;

    Ok(filtered)
}
