//! Bootstrap-aggregated decision trees (random forest).

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{MaxFeatures, ModelConfig, ModelType};
use crate::error::ClassifierError;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::tree::{DecisionTree, TreeParams};

/// Random forest classifier.
///
/// Each tree trains on a bootstrap resample of the rows with a random
/// feature subset examined at every split. Tree RNGs are seeded from a
/// single base seed, so training is reproducible for a fixed
/// `random_state` regardless of rayon's scheduling.
pub struct RandomForestClassifier {
    config: ModelConfig,
    trees: Vec<DecisionTree>,
    classes: Vec<i32>,
    n_features: usize,
}

impl RandomForestClassifier {
    pub fn new(config: ModelConfig) -> Self {
        RandomForestClassifier {
            config,
            trees: Vec::new(),
            classes: Vec::new(),
            n_features: 0,
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn check_params(&self) -> Result<(usize, usize, usize, MaxFeatures, Option<u64>), ClassifierError> {
        let ModelType::RandomForest {
            n_estimators,
            max_depth,
            min_samples_split,
            max_features,
            random_state,
        } = self.config.model_type;

        if n_estimators == 0 {
            return Err(ClassifierError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if max_depth == 0 {
            return Err(ClassifierError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok((
            n_estimators,
            max_depth,
            min_samples_split,
            max_features,
            random_state,
        ))
    }

    fn check_input(&self, x: &Array2<f32>) -> Result<(), ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted(self.name()));
        }
        if x.ncols() != self.n_features {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }
        Ok(())
    }
}

impl ClassifierModel for RandomForestClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), ClassifierError> {
        let (n_estimators, max_depth, min_samples_split, max_features, random_state) =
            self.check_params()?;

        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(ClassifierError::EmptyInput {
                rows: x.nrows(),
                cols: x.ncols(),
            });
        }
        if x.nrows() != y.len() {
            return Err(ClassifierError::LabelLengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }

        // Sorted unique labels define the class order of predict_proba.
        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let encoded: Vec<usize> = y
            .iter()
            .map(|label| classes.binary_search(label).expect("label in class set"))
            .collect();

        let n_split_features = match max_features {
            MaxFeatures::Sqrt => (x.ncols() as f32).sqrt().floor() as usize,
            MaxFeatures::Log2 => (x.ncols() as f32).log2().floor() as usize,
            MaxFeatures::All => x.ncols(),
        }
        .clamp(1, x.ncols());

        let params = TreeParams {
            max_depth,
            min_samples_split: min_samples_split.max(2),
            n_split_features,
        };

        let base_seed = random_state.unwrap_or_else(|| rand::thread_rng().gen());
        let n_rows = x.nrows();
        let n_classes = classes.len();

        log::debug!(
            "training {} trees (depth <= {}, {} split features) on {} rows, {} classes",
            n_estimators,
            max_depth,
            n_split_features,
            n_rows,
            n_classes
        );

        let trees: Vec<DecisionTree> = (0..n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(tree_idx as u64));
                let rows: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                DecisionTree::fit(x, &encoded, rows, n_classes, &params, &mut rng)
            })
            .collect();

        self.trees = trees;
        self.classes = classes;
        self.n_features = x.ncols();
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, ClassifierError> {
        let proba = self.predict_proba(x)?;
        let labels = proba
            .rows()
            .into_iter()
            .map(|row| {
                // Ties resolve to the lowest class label.
                let mut best = 0;
                for (i, v) in row.iter().enumerate() {
                    if *v > row[best] {
                        best = i;
                    }
                }
                self.classes[best]
            })
            .collect();
        Ok(labels)
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        self.check_input(x)?;

        let n_classes = self.classes.len();
        let mut proba = Array2::<f32>::zeros((x.nrows(), n_classes));
        for (r, row) in x.rows().into_iter().enumerate() {
            for tree in &self.trees {
                let dist = tree.predict_proba_row(row);
                for (c, p) in dist.iter().enumerate() {
                    proba[(r, c)] += p;
                }
            }
        }
        let n_trees = self.trees.len() as f32;
        proba.mapv_inplace(|v| v / n_trees);
        Ok(proba)
    }

    fn classes(&self) -> &[i32] {
        &self.classes
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
