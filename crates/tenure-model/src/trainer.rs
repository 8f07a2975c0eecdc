//! The cutoff-by-cutoff training loop.
//!
//! Each step replays history as of one cutoff month: the raw panel is
//! window-filtered, features are re-aggregated, and the forest is
//! warm-start fitted on a fresh stratified split of that snapshot.
//! The ensemble growth between steps is an explicit config parameter,
//! and every step returns a report instead of printing, so the caller
//! owns all console output.

use crate::error::{ModelError, Result};
use crate::forest::RandomForestClassifier;
use crate::metrics::ClassificationMetrics;
use crate::split::stratified_split;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::fmt;
use tenure::PipelineConfig;
use tenure_features::{FeatureMatrix, aggregate_employees, distinct_months, filter_before};

/// Label distribution of one aggregated snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LabelCounts {
    /// Employees without a visible departure.
    pub active: usize,
    /// Employees with a visible departure.
    pub departed: usize,
}

impl fmt::Display for LabelCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active: {:>5}  departed: {:>5}",
            self.active, self.departed
        )
    }
}

/// Outcome of one training-loop step.
#[derive(Debug, Clone)]
pub struct CutoffReport {
    /// Cutoff month of this snapshot.
    pub cutoff: NaiveDate,
    /// Employees visible in the snapshot.
    pub n_employees: usize,
    /// Ensemble size used for this step's fit.
    pub n_estimators: usize,
    /// Holdout evaluation of the fitted ensemble.
    pub metrics: ClassificationMetrics,
    /// Label distribution of the snapshot.
    pub labels: LabelCounts,
}

impl fmt::Display for CutoffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cutoff {} ({} employees, {} trees)",
            self.cutoff, self.n_employees, self.n_estimators
        )?;
        writeln!(f, "{}", self.metrics)?;
        write!(f, "Labels: {}", self.labels)
    }
}

/// Warm-start trainer threading the forest through cutoff iterations.
#[derive(Debug)]
pub struct WarmStartTrainer {
    forest: RandomForestClassifier,
    config: PipelineConfig,
    reference: NaiveDate,
}

impl WarmStartTrainer {
    /// Create a trainer with a fresh forest.
    ///
    /// `reference` must be the maximum observation month of the full
    /// unfiltered dataset; it anchors the tenure of still-active
    /// employees in every snapshot.
    pub fn new(config: PipelineConfig, reference: NaiveDate) -> Self {
        let forest = RandomForestClassifier::new(config.initial_estimators);
        Self {
            forest,
            config,
            reference,
        }
    }

    /// Cutoff months of the training loop: the sorted distinct
    /// observation months with the first `warmup_months` skipped, so
    /// every snapshot carries enough history for meaningful features.
    pub fn training_cutoffs(df: &DataFrame, warmup_months: usize) -> Result<Vec<NaiveDate>> {
        let months = distinct_months(df)?;
        if months.len() <= warmup_months {
            return Err(ModelError::InsufficientHistory {
                available: months.len(),
                warmup: warmup_months,
            });
        }
        Ok(months[warmup_months..].to_vec())
    }

    /// Run one cutoff iteration and grow the ensemble target for the
    /// next one.
    pub fn step(&mut self, raw_train: &DataFrame, cutoff: NaiveDate) -> Result<CutoffReport> {
        let snapshot = filter_before(raw_train, cutoff)?;
        let features = aggregate_employees(&snapshot, self.reference)?;
        let matrix = FeatureMatrix::from_frame(&features)?;

        let split = stratified_split(
            &matrix.x,
            &matrix.y,
            self.config.holdout_fraction,
            self.config.split_seed,
        )?;

        self.forest.fit(&split.x_train, &split.y_train)?;

        let y_pred = self.forest.predict(&split.x_test)?;
        let y_proba = self.forest.predict_proba(&split.x_test)?;
        let metrics = ClassificationMetrics::from_predictions(&split.y_test, &y_pred, &y_proba);

        let departed = matrix.y.iter().filter(|&&label| label >= 0.5).count();
        let labels = LabelCounts {
            active: matrix.len() - departed,
            departed,
        };

        let n_estimators = self.forest.n_estimators();
        self.forest.grow(self.config.estimator_growth);

        Ok(CutoffReport {
            cutoff,
            n_employees: matrix.len(),
            n_estimators,
            metrics,
            labels,
        })
    }

    /// The forest in its current state.
    pub const fn forest(&self) -> &RandomForestClassifier {
        &self.forest
    }

    /// Consume the trainer and keep the fitted forest.
    pub fn into_forest(self) -> RandomForestClassifier {
        self.forest
    }
}
