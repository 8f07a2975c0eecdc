//! Seeded stratified train/holdout partitioning.

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// A stratified train/holdout partition of a design matrix.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// Training feature rows.
    pub x_train: Array2<f64>,
    /// Training labels.
    pub y_train: Array1<f64>,
    /// Holdout feature rows.
    pub x_test: Array2<f64>,
    /// Holdout labels.
    pub y_test: Array1<f64>,
}

/// Split `(x, y)` into train and holdout, stratified by label.
///
/// Each class contributes `holdout_fraction` of its rows (at least
/// one) to the holdout, so the class balance of both partitions
/// mirrors the input. Shuffling uses a ChaCha8 generator seeded with
/// `seed`, making the partition reproducible. A class with fewer than
/// two rows cannot appear on both sides and is rejected.
pub fn stratified_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    holdout_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if x.nrows() != y.len() {
        return Err(ModelError::ShapeMismatch {
            expected: format!("{} labels", x.nrows()),
            actual: format!("{} labels", y.len()),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_idx = Vec::new();
    let mut holdout_idx = Vec::new();

    for class in [0.0, 1.0] {
        let mut members: Vec<usize> = (0..y.len())
            .filter(|&i| (y[i] >= 0.5) == (class >= 0.5))
            .collect();
        if members.is_empty() {
            continue;
        }
        if members.len() < 2 {
            return Err(ModelError::DegenerateSplit {
                label: class as u8,
                count: members.len(),
            });
        }

        members.shuffle(&mut rng);
        let n_holdout = ((members.len() as f64 * holdout_fraction).round() as usize)
            .clamp(1, members.len() - 1);

        holdout_idx.extend_from_slice(&members[..n_holdout]);
        train_idx.extend_from_slice(&members[n_holdout..]);
    }

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), &train_idx),
        y_train: select_labels(y, &train_idx),
        x_test: x.select(Axis(0), &holdout_idx),
        y_test: select_labels(y, &holdout_idx),
    })
}

fn select_labels(y: &Array1<f64>, indices: &[usize]) -> Array1<f64> {
    Array1::from_vec(indices.iter().map(|&i| y[i]).collect())
}
