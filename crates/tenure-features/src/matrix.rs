//! Extraction of the ndarray design matrix from aggregated features.

use crate::error::{FeatureError, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use tenure::schema;

/// Design matrix view of an aggregated feature frame.
///
/// `x` carries the feature columns in `schema::FEATURE_COLUMNS` order;
/// `Emp_ID` and the `Fired` label are excluded from the matrix and
/// carried separately as `ids` and `y` (0.0 / 1.0).
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Employee IDs, row-aligned with `x` and `y`.
    pub ids: Vec<i64>,
    /// Feature matrix, one row per employee.
    pub x: Array2<f64>,
    /// Label vector.
    pub y: Array1<f64>,
}

impl FeatureMatrix {
    /// Extract `(ids, X, y)` from an aggregated feature frame.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let n = df.height();
        if n == 0 {
            return Err(FeatureError::EmptyFrame);
        }

        let id_values = df.column(schema::EMP_ID)?.i64()?;
        let mut ids = Vec::with_capacity(n);
        for (row, id) in id_values.into_iter().enumerate() {
            ids.push(id.ok_or_else(|| FeatureError::MissingValue {
                column: schema::EMP_ID.to_string(),
                row,
            })?);
        }

        let mut x = Array2::zeros((n, schema::FEATURE_COLUMNS.len()));
        for (j, column) in schema::FEATURE_COLUMNS.iter().enumerate() {
            let values = df.column(column)?.cast(&DataType::Float64)?;
            let values = values.f64()?;
            for i in 0..n {
                x[[i, j]] = values.get(i).ok_or_else(|| FeatureError::MissingValue {
                    column: (*column).to_string(),
                    row: i,
                })?;
            }
        }

        let fired = df.column(schema::FIRED)?.bool()?;
        let mut y = Array1::zeros(n);
        for i in 0..n {
            let label = fired.get(i).ok_or_else(|| FeatureError::MissingValue {
                column: schema::FIRED.to_string(),
                row: i,
            })?;
            y[i] = if label { 1.0 } else { 0.0 };
        }

        Ok(Self { ids, x, y })
    }

    /// Number of employees in the matrix.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
