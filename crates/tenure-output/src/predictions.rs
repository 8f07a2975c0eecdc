//! Prediction file export.
//!
//! The submission format is fixed: one `Emp_ID,Target` row per test
//! employee, with `Target` a hard 0/1 label (1 predicts a departure).
//! Rows keep the order in which the IDs arrived.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tenure::schema;
use thiserror::Error;

/// Errors that can occur while exporting predictions.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IDs and predictions do not pair up.
    #[error("{ids} employee IDs but {predictions} predictions")]
    LengthMismatch {
        /// Number of employee IDs.
        ids: usize,
        /// Number of predictions.
        predictions: usize,
    },
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The canonical `Emp_ID,Target` CSV.
    Csv,

    /// Compact JSON, for downstream tooling.
    Json,
}

/// A single prediction row of the output file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRow {
    /// Employee identifier.
    #[serde(rename = "Emp_ID")]
    pub emp_id: i64,

    /// Predicted label: 1 departs, 0 stays.
    #[serde(rename = "Target")]
    pub target: u8,
}

/// Predicted label distribution of one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDistribution {
    /// Employees predicted to stay.
    pub staying: usize,
    /// Employees predicted to depart.
    pub leaving: usize,
}

impl fmt::Display for LabelDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} predicted to stay, {} predicted to leave",
            self.staying, self.leaving
        )
    }
}

/// The full set of prediction rows for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionExport {
    rows: Vec<PredictionRow>,
}

impl PredictionExport {
    /// Pair employee IDs with hard 0/1 labels from the classifier.
    ///
    /// Labels at or above 0.5 become 1, matching the decision
    /// threshold of the model's `predict`.
    pub fn from_labels(emp_ids: &[i64], labels: &[f64]) -> Result<Self, OutputError> {
        if emp_ids.len() != labels.len() {
            return Err(OutputError::LengthMismatch {
                ids: emp_ids.len(),
                predictions: labels.len(),
            });
        }

        let rows = emp_ids
            .iter()
            .zip(labels.iter())
            .map(|(&emp_id, &label)| PredictionRow {
                emp_id,
                target: u8::from(label >= 0.5),
            })
            .collect();
        Ok(Self { rows })
    }

    /// The prediction rows, in input order.
    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    /// Number of predicted employees.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the export holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count predicted labels on both sides of the threshold.
    pub fn distribution(&self) -> LabelDistribution {
        let leaving = self.rows.iter().filter(|row| row.target == 1).count();
        LabelDistribution {
            staying: self.rows.len() - leaving,
            leaving,
        }
    }

    /// Serialize the export to a string in the requested format.
    pub fn export_to_string(&self, format: ExportFormat) -> Result<String, OutputError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record([schema::EMP_ID, schema::TARGET])?;
                for row in &self.rows {
                    wtr.write_record([row.emp_id.to_string(), row.target.to_string()])?;
                }
                let data = wtr
                    .into_inner()
                    .map_err(|e| OutputError::Io(e.into_error()))?;
                Ok(String::from_utf8(data).map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
                })?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&self.rows)?),
        }
    }

    /// Write the export to a file in the requested format.
    pub fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), OutputError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_become_hard_targets() {
        let export = PredictionExport::from_labels(&[1, 2, 3], &[0.0, 1.0, 0.5]).unwrap();
        let targets: Vec<u8> = export.rows().iter().map(|r| r.target).collect();
        assert_eq!(targets, vec![0, 1, 1]);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let export = PredictionExport::from_labels(&[101, 102], &[1.0, 0.0]).unwrap();
        let csv = export.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv, "Emp_ID,Target\n101,1\n102,0\n");
    }

    #[test]
    fn test_row_order_follows_input_order() {
        let export = PredictionExport::from_labels(&[9, 3, 7], &[0.0, 0.0, 1.0]).unwrap();
        let ids: Vec<i64> = export.rows().iter().map(|r| r.emp_id).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }

    #[test]
    fn test_json_export() {
        let export = PredictionExport::from_labels(&[101], &[1.0]).unwrap();
        let json = export.export_to_string(ExportFormat::Json).unwrap();
        assert_eq!(json, r#"[{"Emp_ID":101,"Target":1}]"#);
    }

    #[test]
    fn test_distribution_counts_both_sides() {
        let export = PredictionExport::from_labels(&[1, 2, 3, 4], &[0.0, 1.0, 1.0, 0.2]).unwrap();
        let dist = export.distribution();
        assert_eq!(
            dist,
            LabelDistribution {
                staying: 2,
                leaving: 2,
            }
        );
        assert_eq!(dist.to_string(), "2 predicted to stay, 2 predicted to leave");
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert!(matches!(
            PredictionExport::from_labels(&[1, 2], &[0.0]),
            Err(OutputError::LengthMismatch {
                ids: 2,
                predictions: 1,
            })
        ));
    }

    #[test]
    fn test_export_to_file() {
        let export = PredictionExport::from_labels(&[101, 102], &[0.0, 1.0]).unwrap();
        let path = std::env::temp_dir().join("tenure_test_output.csv");

        export.export_to_file(&path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Emp_ID,Target\n101,0\n102,1\n");

        std::fs::remove_file(path).ok();
    }
}
