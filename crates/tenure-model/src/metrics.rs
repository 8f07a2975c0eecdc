//! Binary classification metrics for holdout evaluation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confusion matrix for binary classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// True negatives.
    pub tn: usize,
    /// False positives.
    pub fp: usize,
    /// False negatives.
    pub fn_: usize,
    /// True positives.
    pub tp: usize,
}

impl ConfusionMatrix {
    /// Count outcomes from label and prediction vectors.
    pub fn from_predictions(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mut matrix = Self {
            tn: 0,
            fp: 0,
            fn_: 0,
            tp: 0,
        };

        for (&truth, &predicted) in y_true.iter().zip(y_pred.iter()) {
            match (truth >= 0.5, predicted >= 0.5) {
                (false, false) => matrix.tn += 1,
                (false, true) => matrix.fp += 1,
                (true, false) => matrix.fn_ += 1,
                (true, true) => matrix.tp += 1,
            }
        }

        matrix
    }

    /// Total number of evaluated samples.
    pub const fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[[{:>5} {:>5}]", self.tn, self.fp)?;
        write!(f, " [{:>5} {:>5}]]", self.fn_, self.tp)
    }
}

/// Holdout evaluation metrics for one cutoff iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// Outcome counts.
    pub confusion: ConfusionMatrix,
    /// `(TP + TN) / total`.
    pub accuracy: f64,
    /// `TP / (TP + FP)`.
    pub precision: f64,
    /// `TP / (TP + FN)`.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Area under the ROC curve from predicted probabilities.
    pub auroc: f64,
}

impl ClassificationMetrics {
    /// Compute all metrics from labels, hard predictions, and
    /// positive-class probabilities.
    pub fn from_predictions(
        y_true: &Array1<f64>,
        y_pred: &Array1<f64>,
        y_proba: &Array1<f64>,
    ) -> Self {
        let confusion = ConfusionMatrix::from_predictions(y_true, y_pred);

        let total = confusion.total() as f64;
        let accuracy = if total > 0.0 {
            (confusion.tp + confusion.tn) as f64 / total
        } else {
            0.0
        };
        let precision = ratio(confusion.tp, confusion.tp + confusion.fp);
        let recall = ratio(confusion.tp, confusion.tp + confusion.fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        let auroc = auroc(y_true, y_proba);

        Self {
            confusion,
            accuracy,
            precision,
            recall,
            f1,
            auroc,
        }
    }
}

impl fmt::Display for ClassificationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.confusion)?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall: {:.4}", self.recall)?;
        writeln!(f, "F1: {:.4}", self.f1)?;
        write!(f, "AUROC: {:.4}", self.auroc)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Area under the ROC curve via the trapezoid rule over thresholds.
///
/// A holdout with only one class has no ranking to score; 0.5 is
/// returned for that degenerate case.
fn auroc(y_true: &Array1<f64>, y_proba: &Array1<f64>) -> f64 {
    let mut pairs: Vec<(f64, bool)> = y_proba
        .iter()
        .zip(y_true.iter())
        .map(|(&p, &t)| (p, t >= 0.5))
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let n_pos = pairs.iter().filter(|(_, positive)| *positive).count() as f64;
    let n_neg = pairs.len() as f64 - n_pos;
    if n_pos == 0.0 || n_neg == 0.0 {
        return 0.5;
    }

    let mut area = 0.0;
    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut prev_tpr = 0.0;
    let mut prev_fpr = 0.0;

    let mut i = 0;
    while i < pairs.len() {
        // Advance over ties so equal scores form a single ROC point.
        let score = pairs[i].0;
        while i < pairs.len() && pairs[i].0 == score {
            if pairs[i].1 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }

        let tpr = tp / n_pos;
        let fpr = fp / n_neg;
        area += (fpr - prev_fpr) * (tpr + prev_tpr) / 2.0;
        prev_tpr = tpr;
        prev_fpr = fpr;
    }

    area
}
