//! Preprocessing stages shared by the pipeline and standalone callers.
//!
//! Provides an `Imputer` for missing-value replacement and a `Scaler` for
//! mean/std standardization, both behind the `Transform` trait so the
//! pipeline can chain them.

use ndarray::Array2;

use crate::config::ImputeStrategy;
use crate::error::ClassifierError;

/// Common contract for preprocessing stages: learn statistics from training
/// data, then apply them to any matrix of the same width.
pub trait Transform {
    /// Learn the stage's statistics from `x`.
    fn fit(&mut self, x: &Array2<f32>) -> Result<(), ClassifierError>;

    /// Apply the learned statistics to `x`, returning a new matrix.
    fn transform(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError>;

    fn fit_transform(&mut self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Human readable stage name, used in error and log messages.
    fn name(&self) -> &'static str;
}

fn check_nonempty(x: &Array2<f32>) -> Result<(), ClassifierError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(ClassifierError::EmptyInput {
            rows: x.nrows(),
            cols: x.ncols(),
        });
    }
    Ok(())
}

fn check_width(expected: usize, x: &Array2<f32>) -> Result<(), ClassifierError> {
    if x.ncols() != expected {
        return Err(ClassifierError::FeatureCountMismatch {
            expected,
            found: x.ncols(),
        });
    }
    Ok(())
}

/// Missing-value imputer. Non-finite entries (NaN, infinities) are treated
/// as missing and replaced with a per-column fill value learned at fit time.
#[derive(Clone, Debug)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill: Vec<f32>,
}

impl Imputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Imputer {
            strategy,
            fill: Vec::new(),
        }
    }

    /// Fill values learned at fit time, one per column.
    pub fn fill_values(&self) -> &[f32] {
        &self.fill
    }

    fn column_fill(&self, values: &mut Vec<f32>, col: usize) -> f32 {
        if values.is_empty() {
            log::warn!(
                "column {} has no finite values; imputing with 0.0",
                col
            );
            return 0.0;
        }
        match self.strategy {
            ImputeStrategy::Mean => values.iter().sum::<f32>() / values.len() as f32,
            ImputeStrategy::Median => {
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
            ImputeStrategy::Constant(v) => v,
        }
    }
}

impl Transform for Imputer {
    fn fit(&mut self, x: &Array2<f32>) -> Result<(), ClassifierError> {
        check_nonempty(x)?;

        let mut fill = Vec::with_capacity(x.ncols());
        for (col, column) in x.columns().into_iter().enumerate() {
            let mut finite: Vec<f32> = column.iter().copied().filter(|v| v.is_finite()).collect();
            fill.push(self.column_fill(&mut finite, col));
        }
        self.fill = fill;
        Ok(())
    }

    fn transform(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        if self.fill.is_empty() {
            return Err(ClassifierError::NotFitted(self.name()));
        }
        check_width(self.fill.len(), x)?;

        let mut out = x.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                if !v.is_finite() {
                    *v = self.fill[c];
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "imputer"
    }
}

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    pub fn new() -> Self {
        Scaler {
            mean: Vec::new(),
            std: Vec::new(),
        }
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for Scaler {
    fn fit(&mut self, x: &Array2<f32>) -> Result<(), ClassifierError> {
        check_nonempty(x)?;

        let nrows = x.nrows() as f32;
        let mut mean = vec![0.0f32; x.ncols()];
        for row in x.rows() {
            for (c, v) in row.iter().enumerate() {
                mean[c] += v;
            }
        }
        for v in mean.iter_mut() {
            *v /= nrows;
        }

        let mut std = vec![0.0f32; x.ncols()];
        for row in x.rows() {
            for (c, v) in row.iter().enumerate() {
                let d = v - mean[c];
                std[c] += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows).sqrt().max(Scaler::MIN_STD);
        }

        self.mean = mean;
        self.std = std;
        Ok(())
    }

    fn transform(&self, x: &Array2<f32>) -> Result<Array2<f32>, ClassifierError> {
        if self.mean.is_empty() {
            return Err(ClassifierError::NotFitted(self.name()));
        }
        check_width(self.mean.len(), x)?;

        let mut out = x.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (*v - self.mean[c]) / self.std[c];
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "scaler"
    }
}
