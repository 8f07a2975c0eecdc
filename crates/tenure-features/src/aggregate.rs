//! Per-employee feature aggregation.
//!
//! Collapses the (possibly window-filtered) monthly panel into one
//! feature row per employee, deriving the `Fired` label alongside the
//! numeric features. The caller supplies the reference date used for
//! the tenure of still-active employees; it must come from the full
//! unfiltered dataset so experience is measured against the true
//! present day rather than an artificially early snapshot maximum.

use crate::error::{FeatureError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeSet;
use tenure::config::AVG_MONTH_DAYS;
use tenure::dates::{date_from_days, days_from_date};
use tenure::schema;

/// Aggregate monthly records into one feature row per employee.
///
/// Derived fields, computed per `Emp_ID` group in one pass:
/// - `Salary Change`: `(max - min) / min` of salary. A single record
///   yields `0`; a zero minimum would yield a non-finite ratio and is
///   clamped to `0` (see below).
/// - `Total Business Value All`: summed business value.
/// - `Overvalue`: mean of the row-wise business value / salary ratio.
/// - `Work Experience`: months between joining and the employee's last
///   visible `LastWorkingDate`, or `reference` while still active,
///   rounded up.
/// - `Fired`: true iff any visible record carries a `LastWorkingDate`.
///
/// Non-finite ratio values (zero salaries) are clamped to `0.0` rather
/// than propagated into the design matrix. Output row order is not
/// significant.
pub fn aggregate_employees(df: &DataFrame, reference: NaiveDate) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(FeatureError::EmptyFrame);
    }

    let salary = col(schema::SALARY).cast(DataType::Float64);
    let business_value = col(schema::TOTAL_BUSINESS_VALUE).cast(DataType::Float64);

    let salary_change = ((salary.clone().max() - salary.clone().min()) / salary.clone().min())
        .alias(schema::SALARY_CHANGE);

    let business_value_all = business_value
        .clone()
        .sum()
        .alias(schema::TOTAL_BUSINESS_VALUE_ALL);

    let overvalue = (business_value / salary).mean().alias(schema::OVERVALUE);

    // Tenure reference: last visible departure date, else the global
    // maximum observation month of the full dataset.
    let last_seen = col(schema::LAST_WORKING_DATE).last().cast(DataType::Int32);
    let reference_days = when(last_seen.clone().is_null())
        .then(lit(days_from_date(reference)))
        .otherwise(last_seen);
    let work_experience = ((reference_days
        - col(schema::DATE_OF_JOINING).first().cast(DataType::Int32))
    .cast(DataType::Float64)
        / lit(AVG_MONTH_DAYS))
    .ceil()
    .cast(DataType::Int32)
    .alias(schema::WORK_EXPERIENCE);

    let fired = col(schema::LAST_WORKING_DATE)
        .count()
        .gt(lit(0))
        .alias(schema::FIRED);

    let aggregated = df
        .clone()
        .lazy()
        .group_by([col(schema::EMP_ID)])
        .agg([
            salary_change,
            business_value_all,
            overvalue,
            work_experience,
            fired,
        ])
        .collect()?;

    clamp_non_finite(aggregated, &[schema::SALARY_CHANGE, schema::OVERVALUE])
}

/// Replace non-finite ratio values with `0.0`.
///
/// Zero salaries make `Salary Change` and `Overvalue` divide by zero;
/// the explicit policy is to clamp rather than feed `inf`/`NaN` to the
/// classifier.
fn clamp_non_finite(mut df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    for name in columns {
        let clamped = {
            let values = df.column(name)?.f64()?;
            values.apply_values(|v| if v.is_finite() { v } else { 0.0 })
        };
        df.with_column(clamped.into_series())?;
    }
    Ok(df)
}

/// Maximum observation month of the dataset.
pub fn global_max_month(df: &DataFrame) -> Result<NaiveDate> {
    let months = df.column(schema::MONTH)?.cast(&DataType::Int32)?;
    let max = months.i32()?.max().ok_or(FeatureError::EmptyFrame)?;
    Ok(date_from_days(max))
}

/// Distinct observation months, ascending.
pub fn distinct_months(df: &DataFrame) -> Result<Vec<NaiveDate>> {
    let months = df.column(schema::MONTH)?.cast(&DataType::Int32)?;
    let unique: BTreeSet<i32> = months.i32()?.into_no_null_iter().collect();
    Ok(unique.into_iter().map(date_from_days).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, raw_frame};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn feature_row(df: &DataFrame, emp_id: i64) -> usize {
        let ids = df.column(schema::EMP_ID).unwrap();
        let ids = ids.i64().unwrap();
        (0..df.height())
            .find(|&i| ids.get(i) == Some(emp_id))
            .expect("employee present")
    }

    fn f64_at(df: &DataFrame, column: &str, row: usize) -> f64 {
        df.column(column).unwrap().f64().unwrap().get(row).unwrap()
    }

    #[test]
    fn test_one_row_per_employee() {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 50_000.0, 100.0),
            (1, date(2017, 2, 1), date(2016, 1, 1), None, 50_000.0, 100.0),
            (2, date(2017, 1, 1), date(2016, 3, 1), None, 40_000.0, 50.0),
        ]);
        let out = aggregate_employees(&df, date(2017, 2, 1)).unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(out.column(schema::EMP_ID).unwrap().n_unique().unwrap(), 2);
    }

    #[rstest]
    #[case(50_000.0, 60_000.0, 0.2)]
    #[case(60_000.0, 50_000.0, 0.2)] // order within the window is irrelevant
    #[case(40_000.0, 40_000.0, 0.0)]
    fn test_salary_change_ratio(#[case] first: f64, #[case] second: f64, #[case] expected: f64) {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, first, 0.0),
            (1, date(2017, 2, 1), date(2016, 1, 1), None, second, 0.0),
        ]);
        let out = aggregate_employees(&df, date(2017, 2, 1)).unwrap();
        let row = feature_row(&out, 1);
        assert_relative_eq!(f64_at(&out, schema::SALARY_CHANGE, row), expected);
    }

    #[test]
    fn test_salary_change_single_record_is_zero() {
        let df = raw_frame(&[(1, date(2017, 1, 1), date(2016, 1, 1), None, 50_000.0, 0.0)]);
        let out = aggregate_employees(&df, date(2017, 1, 1)).unwrap();
        assert_eq!(f64_at(&out, schema::SALARY_CHANGE, 0), 0.0);
    }

    #[test]
    fn test_zero_salary_is_clamped() {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 0.0, 100.0),
            (1, date(2017, 2, 1), date(2016, 1, 1), None, 1_000.0, 100.0),
        ]);
        let out = aggregate_employees(&df, date(2017, 2, 1)).unwrap();
        assert_eq!(f64_at(&out, schema::SALARY_CHANGE, 0), 0.0);
        assert_eq!(f64_at(&out, schema::OVERVALUE, 0), 0.0);
    }

    #[test]
    fn test_business_value_sums_with_negatives() {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 50_000.0, 300.0),
            (1, date(2017, 2, 1), date(2016, 1, 1), None, 50_000.0, -100.0),
        ]);
        let out = aggregate_employees(&df, date(2017, 2, 1)).unwrap();
        assert_relative_eq!(f64_at(&out, schema::TOTAL_BUSINESS_VALUE_ALL, 0), 200.0);
    }

    #[test]
    fn test_overvalue_is_rowwise_mean_not_ratio_of_sums() {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 100.0, 100.0),
            (1, date(2017, 2, 1), date(2016, 1, 1), None, 400.0, 100.0),
        ]);
        let out = aggregate_employees(&df, date(2017, 2, 1)).unwrap();
        // mean(100/100, 100/400) = 0.625; sum/sum would give 0.4.
        assert_relative_eq!(f64_at(&out, schema::OVERVALUE, 0), 0.625);
    }

    #[test]
    fn test_fired_label() {
        let df = raw_frame(&[
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 50_000.0, 0.0),
            (
                2,
                date(2017, 1, 1),
                date(2016, 1, 1),
                Some(date(2017, 1, 20)),
                50_000.0,
                0.0,
            ),
        ]);
        let out = aggregate_employees(&df, date(2017, 1, 1)).unwrap();
        let fired = out.column(schema::FIRED).unwrap();
        let fired = fired.bool().unwrap();
        assert_eq!(fired.get(feature_row(&out, 1)), Some(false));
        assert_eq!(fired.get(feature_row(&out, 2)), Some(true));
    }

    #[test]
    fn test_work_experience_active_uses_reference() {
        // Active employee: one year from joining to the reference date,
        // ceil(365 / 30.436875) = 12 months.
        let df = raw_frame(&[(1, date(2017, 1, 1), date(2016, 1, 1), None, 50_000.0, 0.0)]);
        let out = aggregate_employees(&df, date(2016, 12, 31)).unwrap();
        let months = out.column(schema::WORK_EXPERIENCE).unwrap();
        assert_eq!(months.i32().unwrap().get(0), Some(12));
    }

    #[test]
    fn test_work_experience_departed_uses_last_working_date() {
        // Departed: reference date is ignored in favor of the departure.
        let df = raw_frame(&[(
            1,
            date(2016, 3, 1),
            date(2016, 1, 1),
            Some(date(2016, 3, 15)),
            50_000.0,
            0.0,
        )]);
        let out = aggregate_employees(&df, date(2020, 1, 1)).unwrap();
        let months = out.column(schema::WORK_EXPERIENCE).unwrap();
        // 74 days / 30.436875 = 2.43 -> 3.
        assert_eq!(months.i32().unwrap().get(0), Some(3));
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let df = raw_frame(&[(1, date(2017, 1, 1), date(2016, 1, 1), None, 1.0, 0.0)]);
        let empty = df.head(Some(0));
        assert!(matches!(
            aggregate_employees(&empty, date(2017, 1, 1)),
            Err(FeatureError::EmptyFrame)
        ));
    }

    #[test]
    fn test_distinct_months_sorted_ascending() {
        let df = raw_frame(&[
            (1, date(2017, 3, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (1, date(2017, 1, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (2, date(2017, 3, 1), date(2016, 1, 1), None, 1.0, 0.0),
        ]);
        let months = distinct_months(&df).unwrap();
        assert_eq!(months, vec![date(2017, 1, 1), date(2017, 3, 1)]);
    }

    #[test]
    fn test_global_max_month() {
        let df = raw_frame(&[
            (1, date(2017, 3, 1), date(2016, 1, 1), None, 1.0, 0.0),
            (2, date(2017, 8, 1), date(2016, 1, 1), None, 1.0, 0.0),
        ]);
        assert_eq!(global_max_month(&df).unwrap(), date(2017, 8, 1));
    }
}
