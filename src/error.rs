use std::error::Error;
use std::fmt;

/// Custom error type for pipeline and model failures
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Zero rows or zero columns passed to a fit call
    EmptyInput { rows: usize, cols: usize },
    /// Feature matrix and label vector disagree on the number of records
    LabelLengthMismatch { rows: usize, labels: usize },
    /// Input width at transform/predict time differs from fit time
    FeatureCountMismatch { expected: usize, found: usize },
    /// A transform or predict call arrived before fit
    NotFitted(&'static str),
    /// A hyperparameter is degenerate (zero trees, zero depth, ...)
    InvalidParameter(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::EmptyInput { rows, cols } => {
                write!(f, "input matrix is empty ({} rows, {} columns)", rows, cols)
            }
            ClassifierError::LabelLengthMismatch { rows, labels } => write!(
                f,
                "feature matrix has {} rows but label vector has {} entries",
                rows, labels
            ),
            ClassifierError::FeatureCountMismatch { expected, found } => write!(
                f,
                "expected {} features (as seen at fit time), got {}",
                expected, found
            ),
            ClassifierError::NotFitted(stage) => {
                write!(f, "{} has not been fitted yet", stage)
            }
            ClassifierError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl Error for ClassifierError {}
