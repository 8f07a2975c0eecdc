//! Binary classification decision tree used by the forest.
//!
//! Trees are always built on bootstrap samples by the forest, with a
//! random feature subset considered at every split (CART with gini
//! impurity). Leaves store the positive-class fraction so the forest
//! can average calibrated probabilities across members.

use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Per-tree growth limits, shared by all members of a forest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct TreeConfig {
    /// Maximum depth; `None` grows until pure or exhausted.
    pub max_depth: Option<usize>,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum samples each child must retain.
    pub min_samples_leaf: usize,
    /// Features considered per split.
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Grow a tree over the sample rows named by `indices`.
    pub(crate) fn fit(
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        config: TreeConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        Self {
            root: build_node(x, y, indices, &config, 0, rng),
        }
    }

    /// Positive-class probability for one sample.
    pub(crate) fn predict_proba_one(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn positive_fraction(y: &Array1<f64>, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let positives = indices.iter().filter(|&&i| y[i] >= 0.5).count();
    positives as f64 / indices.len() as f64
}

/// Binary gini impurity: `2 p (1 - p)`.
fn gini(p: f64) -> f64 {
    2.0 * p * (1.0 - p)
}

fn build_node(
    x: &Array2<f64>,
    y: &Array1<f64>,
    indices: &[usize],
    config: &TreeConfig,
    depth: usize,
    rng: &mut ChaCha8Rng,
) -> Node {
    let p = positive_fraction(y, indices);
    let impurity = gini(p);

    let depth_exhausted = config.max_depth.is_some_and(|limit| depth >= limit);
    if depth_exhausted || indices.len() < config.min_samples_split || impurity < 1e-12 {
        return Node::Leaf { probability: p };
    }

    match find_best_split(x, y, indices, config, impurity, rng) {
        Some((feature, threshold, left_idx, right_idx)) => {
            let left = build_node(x, y, &left_idx, config, depth + 1, rng);
            let right = build_node(x, y, &right_idx, config, depth + 1, rng);
            Node::Split {
                feature,
                threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => Node::Leaf { probability: p },
    }
}

#[allow(clippy::type_complexity)]
fn find_best_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    indices: &[usize],
    config: &TreeConfig,
    parent_impurity: f64,
    rng: &mut ChaCha8Rng,
) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
    let n_features = x.ncols();
    let mut feature_order: Vec<usize> = (0..n_features).collect();
    feature_order.shuffle(rng);
    feature_order.truncate(config.max_features.clamp(1, n_features));

    let mut best_gain = 0.0;
    let mut best: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

    for &feature in &feature_order {
        let mut values: Vec<f64> = indices.iter().map(|&i| x[[i, feature]]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
                indices.iter().partition(|&&i| x[[i, feature]] <= threshold);

            if left_idx.len() < config.min_samples_leaf || right_idx.len() < config.min_samples_leaf
            {
                continue;
            }

            let left_impurity = gini(positive_fraction(y, &left_idx));
            let right_impurity = gini(positive_fraction(y, &right_idx));

            let n_left = left_idx.len() as f64;
            let n_right = right_idx.len() as f64;
            let weighted =
                (n_left * left_impurity + n_right * right_impurity) / (n_left + n_right);
            let gain = parent_impurity - weighted;

            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, threshold, left_idx, right_idx));
            }
        }
    }

    best
}
