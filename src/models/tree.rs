//! CART decision tree used as the random-forest base learner.
//!
//! Trees are grown greedily on Gini impurity with midpoint thresholds and a
//! per-split random feature subset, and stored as a flat node arena. Labels
//! arrive already encoded as class indices; the forest owns the mapping back
//! to caller-visible labels.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;

/// Growth limits resolved by the forest from its configuration.
#[derive(Clone, Debug)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Number of features examined at each split (already resolved from
    /// the `MaxFeatures` setting).
    pub n_split_features: usize,
}

#[derive(Clone, Debug)]
enum Node {
    Leaf {
        /// Class distribution at the leaf, normalized to sum to 1.
        dist: Vec<f32>,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Clone, Debug)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

impl DecisionTree {
    /// Grow a tree on the given rows of `x`. `y` holds class indices in
    /// `0..n_classes`, aligned with the rows of `x`.
    pub(crate) fn fit(
        x: &Array2<f32>,
        y: &[usize],
        rows: Vec<usize>,
        n_classes: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = DecisionTree {
            nodes: Vec::new(),
            n_classes,
        };
        tree.build(x, y, rows, 0, params, rng);
        tree
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Class distribution for a single (fully imputed) row.
    pub(crate) fn predict_proba_row(&self, row: ArrayView1<f32>) -> &[f32] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { dist } => return dist,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn build(
        &mut self,
        x: &Array2<f32>,
        y: &[usize],
        rows: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(y, &rows, self.n_classes);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        if pure || depth >= params.max_depth || rows.len() < params.min_samples_split {
            return self.push_leaf(&counts);
        }

        let Some(split) = best_split(x, y, &rows, self.n_classes, params, rng) else {
            return self.push_leaf(&counts);
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| x[(r, split.feature)] <= split.threshold);

        // Midpoint thresholds guarantee both sides are populated, but guard
        // against degenerate float comparisons anyway.
        if left_rows.is_empty() || right_rows.is_empty() {
            return self.push_leaf(&counts);
        }

        let node_idx = self.nodes.len();
        self.nodes.push(Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: 0,
            right: 0,
        });

        let left = self.build(x, y, left_rows, depth + 1, params, rng);
        let right = self.build(x, y, right_rows, depth + 1, params, rng);

        if let Node::Split {
            left: l, right: r, ..
        } = &mut self.nodes[node_idx]
        {
            *l = left;
            *r = right;
        }
        node_idx
    }

    fn push_leaf(&mut self, counts: &[usize]) -> usize {
        let total = counts.iter().sum::<usize>().max(1) as f32;
        let dist = counts.iter().map(|&c| c as f32 / total).collect();
        let idx = self.nodes.len();
        self.nodes.push(Node::Leaf { dist });
        idx
    }
}

struct Split {
    feature: usize,
    threshold: f32,
}

fn class_counts(y: &[usize], rows: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &r in rows {
        counts[y[r]] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f32;
    let mut sum_sq = 0.0f32;
    for &c in counts {
        let p = c as f32 / total;
        sum_sq += p * p;
    }
    1.0 - sum_sq
}

/// Find the (feature, threshold) pair minimizing the weighted child Gini
/// impurity over a random feature subset. Returns `None` when no candidate
/// feature has two distinct values among the rows.
fn best_split(
    x: &Array2<f32>,
    y: &[usize],
    rows: &[usize],
    n_classes: usize,
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<Split> {
    let n_features = x.ncols();
    let k = params.n_split_features.clamp(1, n_features);
    let candidates = rand::seq::index::sample(rng, n_features, k);

    let n = rows.len();
    let mut best: Option<(Split, f32)> = None;

    let mut pairs: Vec<(f32, usize)> = Vec::with_capacity(n);
    for feature in candidates {
        pairs.clear();
        pairs.extend(rows.iter().map(|&r| (x[(r, feature)], y[r])));
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_counts = vec![0usize; n_classes];
        let mut total_counts = vec![0usize; n_classes];
        for &(_, class) in pairs.iter() {
            total_counts[class] += 1;
        }

        for i in 0..n - 1 {
            left_counts[pairs[i].1] += 1;
            if pairs[i + 1].0 <= pairs[i].0 {
                continue;
            }

            let n_left = i + 1;
            let n_right = n - n_left;
            let right_counts: Vec<usize> = total_counts
                .iter()
                .zip(left_counts.iter())
                .map(|(&t, &l)| t - l)
                .collect();

            let weighted = (n_left as f32 * gini(&left_counts, n_left)
                + n_right as f32 * gini(&right_counts, n_right))
                / n as f32;

            if best.as_ref().map_or(true, |(_, b)| weighted < *b) {
                let threshold = pairs[i].0 + (pairs[i + 1].0 - pairs[i].0) / 2.0;
                best = Some((Split { feature, threshold }, weighted));
            }
        }
    }

    best.map(|(split, _)| split)
}
