use ndarray::Array2;

use crate::error::ClassifierError;

/// A small trait abstraction for classifier models used by the pipeline.
/// Centralizing the contract in the `models` module lets implementations
/// live next to model code and the pipeline hold a boxed instance.
pub trait ClassifierModel {
    /// Fit the model on `x` (rows are records) against integer class labels.
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), ClassifierError>;

    /// Predict one class label per input row, in input order.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, ClassifierError>;

    /// Predict per-row class-membership probabilities over `classes()`,
    /// each row summing to 1.
    fn predict_proba(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError>;

    /// Sorted class labels observed at fit time. Empty before fit.
    fn classes(&self) -> &[i32];

    /// Optional human readable name for the model
    fn name(&self) -> &'static str {
        "classifier"
    }
}
