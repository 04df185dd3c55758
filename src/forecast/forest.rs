//! Bagged regression trees over a single feature
//!
//! The trend extrapolation fits an ensemble of variance-minimizing decision
//! trees on bootstrap samples of the `(index, count)` pairs, mirroring the
//! forest regressor the original dashboard used. The ensemble is seeded, so
//! the same input always yields the same predictions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Configuration for the forest regressor
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub trees: usize,
    /// Minimum number of samples in a leaf
    pub min_leaf: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Seed for bootstrap sampling
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            min_leaf: 2,
            max_depth: 16,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single regression tree over one explanatory variable
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit a tree on `(x, y)` pairs. The sample must be non-empty.
    #[must_use]
    pub fn fit(points: &[(f64, f64)], config: &ForestConfig) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            root: grow(&sorted, config, 0),
        }
    }

    /// Predict the response at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    threshold,
                    left,
                    right,
                } => {
                    node = if x <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// Grow a node on x-sorted points, splitting where the summed squared error
/// of the two sides is smallest
fn grow(points: &[(f64, f64)], config: &ForestConfig, depth: usize) -> Node {
    let n = points.len();
    if depth >= config.max_depth || n < config.min_leaf * 2 {
        return Node::Leaf { value: mean(points) };
    }

    // Prefix sums over y and y^2 give O(1) squared error per candidate cut
    let mut sum = vec![0.0; n + 1];
    let mut sum_sq = vec![0.0; n + 1];
    for (i, (_, y)) in points.iter().enumerate() {
        sum[i + 1] = sum[i] + y;
        sum_sq[i + 1] = sum_sq[i] + y * y;
    }
    let sse = |from: usize, to: usize| -> f64 {
        let count = (to - from) as f64;
        let segment = sum[to] - sum[from];
        (sum_sq[to] - sum_sq[from]) - segment * segment / count
    };

    let total_sse = sse(0, n);
    let mut best: Option<(usize, f64)> = None;
    for cut in config.min_leaf..=(n - config.min_leaf) {
        // Only cut between distinct x values
        if points[cut - 1].0 >= points[cut].0 {
            continue;
        }
        let cost = sse(0, cut) + sse(cut, n);
        if cost < total_sse && best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((cut, cost));
        }
    }

    match best {
        None => Node::Leaf { value: mean(points) },
        Some((cut, _)) => {
            let threshold = f64::midpoint(points[cut - 1].0, points[cut].0);
            Node::Split {
                threshold,
                left: Box::new(grow(&points[..cut], config, depth + 1)),
                right: Box::new(grow(&points[cut..], config, depth + 1)),
            }
        }
    }
}

fn mean(points: &[(f64, f64)]) -> f64 {
    let total: f64 = points.iter().map(|(_, y)| y).sum();
    total / points.len() as f64
}

/// An ensemble of regression trees fit on bootstrap samples
#[derive(Debug, Clone)]
pub struct ForestRegressor {
    trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    /// Fit the ensemble on parallel `xs`/`ys` sequences
    ///
    /// # Errors
    /// `InvalidInput` when the sequences differ in length, are empty, or
    /// contain non-finite values.
    pub fn fit(xs: &[f64], ys: &[f64], config: &ForestConfig) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::InvalidInput(format!(
                "{} x values against {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(Error::InvalidInput("no training points".to_string()));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(
                "non-finite training value".to_string(),
            ));
        }

        let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let trees = (0..config.trees)
            .map(|_| {
                let sample: Vec<(f64, f64)> = (0..points.len())
                    .map(|_| points[rng.random_range(0..points.len())])
                    .collect();
                RegressionTree::fit(&sample, config)
            })
            .collect();

        Ok(Self { trees })
    }

    /// Predict the response at `x` as the mean of the tree predictions
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(x)).sum();
        total / self.trees.len() as f64
    }
}
