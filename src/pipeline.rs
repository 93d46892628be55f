//! The end-to-end classification pipeline.
//!
//! `Classifier` chains missing-value imputation and standardization in
//! front of a random forest, mirroring the usual impute/scale/model recipe
//! for tabular data. Preprocessing stages are held behind the `Transform`
//! trait and the model behind `ClassifierModel`, so both can be swapped by
//! configuration.

use ndarray::{Array1, Array2};

use crate::config::PipelineConfig;
use crate::error::ClassifierError;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory;
use crate::preprocessing::{Imputer, Scaler, Transform};

pub struct Classifier {
    transforms: Vec<Box<dyn Transform>>,
    model: Box<dyn ClassifierModel>,
    fitted: bool,
}

impl Classifier {
    /// Build the default pipeline: mean imputation, standardization, and a
    /// random forest with 30 trees of depth at most 5.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Build a pipeline with explicit hyperparameters.
    pub fn with_config(config: PipelineConfig) -> Self {
        let transforms: Vec<Box<dyn Transform>> = vec![
            Box::new(Imputer::new(config.imputation)),
            Box::new(Scaler::new()),
        ];
        Classifier {
            transforms,
            model: factory::build_model(config.model),
            fitted: false,
        }
    }

    /// Fit the preprocessing stages and the model.
    ///
    /// Each transform learns its statistics from the output of the previous
    /// stage, then the model trains on the fully transformed matrix.
    /// Refitting overwrites all learned state.
    pub fn fit(&mut self, x: &Array2<f32>, y: &Array1<i32>) -> Result<(), ClassifierError> {
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

        log::debug!(
            "fitting pipeline on {} records with {} features",
            x.nrows(),
            x.ncols()
        );

        let mut current = x.clone();
        for stage in self.transforms.iter_mut() {
            current = stage.fit_transform(&current)?;
        }
        self.model.fit(&current, &y.to_vec())?;
        self.fitted = true;
        Ok(())
    }

    /// Predicted class label per input row, in input order.
    pub fn predict(&self, x: &Array2<f32>) -> Result<Array1<i32>, ClassifierError> {
        let transformed = self.apply_transforms(x)?;
        Ok(Array1::from_vec(self.model.predict(&transformed)?))
    }

    /// Per-row class-membership probabilities over `classes()`, each row
    /// summing to 1.
    pub fn predict_proba(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        let transformed = self.apply_transforms(x)?;
        self.model.predict_proba(&transformed)
    }

    /// Sorted class labels observed at fit time. Empty before fit.
    pub fn classes(&self) -> &[i32] {
        self.model.classes()
    }

    fn apply_transforms(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted("pipeline"));
        }
        let mut current = x.clone();
        for stage in self.transforms.iter() {
            current = stage.transform(&current)?;
        }
        Ok(current)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
