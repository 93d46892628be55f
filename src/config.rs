use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for the classification pipeline.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PipelineConfig {
    pub imputation: ImputeStrategy,

    #[serde(flatten)]
    pub model: ModelConfig,
}

impl PipelineConfig {
    pub fn new(imputation: ImputeStrategy, model: ModelConfig) -> Self {
        Self { imputation, model }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            imputation: ImputeStrategy::Mean,
            model: ModelConfig::default(),
        }
    }
}

/// Strategy used to fill missing feature values at fit time.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Per-column mean of the finite training values
    Mean,
    /// Per-column median of the finite training values
    Median,
    /// A fixed fill value for every column
    Constant(f32),
}

impl FromStr for ImputeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            _ => Err(format!(
                "Unknown imputation strategy: {}. Expected 'mean' or 'median'",
                s
            )),
        }
    }
}

/// Model configuration wrapper, flattened into `PipelineConfig` when serialized.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    RandomForest {
        n_estimators: usize,
        max_depth: usize,
        min_samples_split: usize,
        max_features: MaxFeatures,
        random_state: Option<u64>,
    },
}

/// Number of candidate features examined at each tree split.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// floor(sqrt(n_features)), the usual random-forest default
    Sqrt,
    /// floor(log2(n_features))
    Log2,
    /// Every feature at every split (bagged trees)
    All,
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::RandomForest {
            n_estimators: 30,
            max_depth: 5,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            random_state: None,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random_forest" | "rf" => Ok(ModelType::default()),
            _ => Err(format!("Unknown model type: {}", s)),
        }
    }
}

impl ModelConfig {
    pub fn new(model_type: ModelType) -> Self {
        Self { model_type }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: ModelType::default(),
        }
    }
}
