//! Warm-start random forest classifier.

use crate::error::{ModelError, Result};
use crate::tree::{DecisionTree, TreeConfig};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest for binary classification with warm-start fitting.
///
/// `fit` only trains the trees missing up to the current
/// `n_estimators` target and keeps every previously trained tree, so
/// growing the target and refitting extends the ensemble with members
/// trained on the newest snapshot instead of retraining from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    n_estimators: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    seed: u64,
}

impl RandomForestClassifier {
    /// Create an unfitted forest targeting `n_estimators` trees.
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }

    /// Set the maximum tree depth.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the base seed used to derive per-tree seeds.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Current ensemble size target.
    pub const fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Number of trees actually trained so far.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raise the ensemble size target by `additional` trees.
    ///
    /// The new members are trained by the next `fit` call, on whatever
    /// data that call receives.
    pub fn grow(&mut self, additional: usize) {
        self.n_estimators += additional;
    }

    /// Train the missing trees on `(x, y)`.
    ///
    /// Existing trees are kept untouched; per-tree seeds are derived
    /// from the base seed and the tree's ordinal, so a run is
    /// reproducible regardless of thread scheduling.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} labels", x.nrows()),
                actual: format!("{} labels", y.len()),
            });
        }
        if x.nrows() == 0 {
            return Err(ModelError::ShapeMismatch {
                expected: "at least one sample".to_string(),
                actual: "0 samples".to_string(),
            });
        }

        let config = TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: (x.ncols() as f64).sqrt().ceil() as usize,
        };

        let n_samples = x.nrows();
        let first_new = self.trees.len();
        let base_seed = self.seed;

        let mut new_trees: Vec<DecisionTree> = (first_new..self.n_estimators)
            .into_par_iter()
            .map(|ordinal| {
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(ordinal as u64));
                let bootstrap: Vec<usize> =
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                DecisionTree::fit(x, y, &bootstrap, config, &mut rng)
            })
            .collect();

        self.trees.append(&mut new_trees);
        Ok(())
    }

    /// Mean positive-class probability across all trained trees.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let per_tree: Vec<Vec<f64>> = self
            .trees
            .par_iter()
            .map(|tree| (0..x.nrows()).map(|i| tree.predict_proba_one(x.row(i))).collect())
            .collect();

        let n_trees = per_tree.len() as f64;
        let probabilities = (0..x.nrows())
            .map(|i| per_tree.iter().map(|p| p[i]).sum::<f64>() / n_trees)
            .collect();

        Ok(Array1::from_vec(probabilities))
    }

    /// Predicted labels (0.0 / 1.0) at the 0.5 probability threshold.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}
