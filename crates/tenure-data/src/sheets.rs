//! Raw dataset retrieval from Google Sheets CSV exports.
//!
//! The upstream datasets are identified by opaque spreadsheet IDs and
//! served as delimited text. The export endpoint gives no delivery
//! guarantees, so fetches run with a small bounded retry budget and
//! doubling backoff before the failure is surfaced to the caller.

use crate::error::{DataError, Result};
use polars::prelude::*;
use serde::Deserialize;
use std::time::Duration;
use tenure::config::SHEET_EXPORT_URL;
use tenure::schema;
use tokio::time::sleep;

/// Default number of fetch attempts per sheet.
const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Backoff before the first retry; doubles on every further attempt.
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// One (employee, month) observation as shipped by the spreadsheet.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Emp_ID")]
    emp_id: i64,
    #[serde(rename = "MMM-YY")]
    month: String,
    #[serde(rename = "Dateofjoining")]
    date_of_joining: String,
    #[serde(rename = "LastWorkingDate")]
    last_working_date: Option<String>,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "Total Business Value")]
    total_business_value: f64,
}

/// A row of the test-ID sheet. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct TestIdRecord {
    #[serde(rename = "Emp_ID")]
    emp_id: i64,
}

/// HTTP client for sheet CSV exports with bounded retry.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    max_attempts: usize,
    initial_backoff: Duration,
}

impl SheetClient {
    /// Create a client with the default retry budget (3 attempts).
    pub fn new() -> Self {
        Self::with_retry(DEFAULT_MAX_ATTEMPTS, DEFAULT_INITIAL_BACKOFF)
    }

    /// Create a client with a custom retry budget.
    pub fn with_retry(max_attempts: usize, initial_backoff: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Fetch the raw CSV payload of a sheet.
    pub async fn fetch_csv(&self, sheet_id: &str) -> Result<Vec<u8>> {
        let url = SHEET_EXPORT_URL.replace("{}", sheet_id);
        let mut backoff = self.initial_backoff;
        let mut last_failure = String::new();

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                sleep(backoff).await;
                backoff *= 2;
            }

            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.bytes().await?.to_vec());
                    }
                    // Client errors are not going to heal on retry.
                    if status.is_client_error() {
                        return Err(DataError::HttpStatus {
                            sheet_id: sheet_id.to_string(),
                            status: status.as_u16(),
                        });
                    }
                    last_failure = format!("status {status}");
                }
                Err(e) => last_failure = e.to_string(),
            }
        }

        Err(DataError::RetriesExhausted {
            sheet_id: sheet_id.to_string(),
            attempts: self.max_attempts,
            reason: last_failure,
        })
    }

    /// Fetch and parse the monthly records sheet.
    pub async fn fetch_records(&self, sheet_id: &str) -> Result<DataFrame> {
        let payload = self.fetch_csv(sheet_id).await?;
        parse_records(&payload)
    }

    /// Fetch and parse the held-out test employee IDs.
    pub async fn fetch_test_ids(&self, sheet_id: &str) -> Result<Vec<i64>> {
        let payload = self.fetch_csv(sheet_id).await?;
        parse_test_ids(&payload)
    }
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a CSV payload of monthly records into a DataFrame.
///
/// Date columns stay as strings here; `normalize_dates` converts them
/// to the `Date` dtype in a separate pass.
pub fn parse_records(payload: &[u8]) -> Result<DataFrame> {
    let mut reader = csv::Reader::from_reader(payload);

    let mut emp_ids = Vec::new();
    let mut months = Vec::new();
    let mut joining_dates = Vec::new();
    let mut last_working_dates: Vec<Option<String>> = Vec::new();
    let mut salaries = Vec::new();
    let mut business_values = Vec::new();

    for record in reader.deserialize::<RawRecord>() {
        let record = record?;
        emp_ids.push(record.emp_id);
        months.push(record.month);
        joining_dates.push(record.date_of_joining);
        last_working_dates.push(record.last_working_date.filter(|s| !s.is_empty()));
        salaries.push(record.salary);
        business_values.push(record.total_business_value);
    }

    if emp_ids.is_empty() {
        return Err(DataError::Parse(
            "Sheet payload contained no data rows".to_string(),
        ));
    }

    let df = DataFrame::new(vec![
        Series::new(schema::EMP_ID.into(), emp_ids).into(),
        Series::new(schema::MONTH.into(), months).into(),
        Series::new(schema::DATE_OF_JOINING.into(), joining_dates).into(),
        Series::new(schema::LAST_WORKING_DATE.into(), last_working_dates).into(),
        Series::new(schema::SALARY.into(), salaries).into(),
        Series::new(schema::TOTAL_BUSINESS_VALUE.into(), business_values).into(),
    ])?;

    Ok(df)
}

/// Parse a CSV payload of test employee IDs.
pub fn parse_test_ids(payload: &[u8]) -> Result<Vec<i64>> {
    let mut reader = csv::Reader::from_reader(payload);
    let mut ids = Vec::new();

    for record in reader.deserialize::<TestIdRecord>() {
        ids.push(record?.emp_id);
    }

    if ids.is_empty() {
        return Err(DataError::Parse(
            "Test-ID payload contained no data rows".to_string(),
        ));
    }

    Ok(ids)
}
