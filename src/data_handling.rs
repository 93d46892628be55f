//! Data structures and helpers for loading and splitting tabular datasets.
//!
//! This module defines `Dataset`, which bundles a feature matrix, a label
//! vector, and feature names, along with a CSV loader and a train/test
//! splitter used by the demos and tests.

use std::path::Path;

use anyhow::{bail, Context};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::ClassifierError;
use crate::stats::class_counts;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<i32>,
    /// Column names, aligned with the columns of `x`.
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        x: Array2<f32>,
        y: Array1<i32>,
        feature_names: Vec<String>,
    ) -> Result<Self, ClassifierError> {
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
        if feature_names.len() != x.ncols() {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: x.ncols(),
                found: feature_names.len(),
            });
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
        })
    }

    pub fn n_records(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Load a dataset from a headered CSV file.
    ///
    /// `label_column` names the column holding integer class labels; every
    /// other column is parsed as a feature. Empty fields and the literals
    /// `na`, `nan`, and `null` (case-insensitive) become `f32::NAN` so the
    /// imputer can fill them later; any other non-numeric token is an error.
    pub fn from_csv<P: AsRef<Path>>(path: P, label_column: &str) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let headers = reader.headers().context("failed to read CSV header")?;
        let Some(label_idx) = headers.iter().position(|h| h == label_column) else {
            bail!("label column '{}' not found in {}", label_column, path.display());
        };
        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut data: Vec<f32> = Vec::new();
        let mut labels: Vec<i32> = Vec::new();

        for (line, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("failed to read record {}", line))?;
            if record.len() != feature_names.len() + 1 {
                bail!(
                    "record {} has {} fields, expected {}",
                    line,
                    record.len(),
                    feature_names.len() + 1
                );
            }
            for (i, field) in record.iter().enumerate() {
                if i == label_idx {
                    let label = field
                        .trim()
                        .parse::<i32>()
                        .with_context(|| format!("bad label '{}' on record {}", field, line))?;
                    labels.push(label);
                } else {
                    let value = parse_feature(field).with_context(|| {
                        format!("bad feature value '{}' on record {}", field, line)
                    })?;
                    data.push(value);
                }
            }
        }

        let n_records = labels.len();
        let x = Array2::from_shape_vec((n_records, feature_names.len()), data)
            .context("CSV rows produced a ragged feature matrix")?;

        Dataset::new(x, Array1::from_vec(labels), feature_names).map_err(Into::into)
    }

    /// Split into train and test subsets by shuffling row indices.
    ///
    /// `train_fraction` is the share of records (rounded down) placed in
    /// the training set, clamped so the training set always holds at least
    /// one record and, whenever more than one record exists, at least one
    /// record is held out for testing. So a fraction of 0.0 still trains
    /// on one record and 1.0 still holds one out. A fixed `seed` makes the
    /// split reproducible.
    pub fn train_test_split(
        &self,
        train_fraction: f32,
        seed: Option<u64>,
    ) -> Result<(Dataset, Dataset), ClassifierError> {
        if !(0.0..=1.0).contains(&train_fraction) {
            return Err(ClassifierError::InvalidParameter(format!(
                "train_fraction must be in [0, 1], got {}",
                train_fraction
            )));
        }

        let n = self.n_records();
        let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(|| rand::thread_rng().gen()));
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let n_train = ((n as f32 * train_fraction) as usize).clamp(1, n.saturating_sub(1).max(1));
        let (train_idx, test_idx) = indices.split_at(n_train);

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!(
            "Info: {} records with {} feature columns",
            self.n_records(),
            self.n_features()
        );
        for (label, count) in class_counts(&self.y.to_vec()) {
            log::info!("Info: class {}: {} records", label, count);
        }
        log::info!("-------------------------------");
    }
}

/// Parse one feature field. Empty fields and the documented missing-value
/// markers become NaN; anything else must parse as a number.
fn parse_feature(field: &str) -> Option<f32> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Some(f32::NAN);
    }
    match trimmed.to_lowercase().as_str() {
        "na" | "nan" | "null" => Some(f32::NAN),
        _ => trimmed.parse::<f32>().ok(),
    }
}
