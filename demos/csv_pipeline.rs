//! Load a CSV dataset, split it, train the pipeline, and score the holdout.
//!
//! Usage: `cargo run --example csv_pipeline -- data.csv label`
//! The file needs a header row; the named column holds integer class labels.

use anyhow::{Context, Result};

use grove_classifiers::data_handling::Dataset;
use grove_classifiers::stats::accuracy_score;
use grove_classifiers::Classifier;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: csv_pipeline <data.csv> <label_column>")?;
    let label_column = args.next().unwrap_or_else(|| "label".to_string());

    let dataset = Dataset::from_csv(&path, &label_column)?;
    dataset.log_input_data_summary();

    let (train, test) = dataset.train_test_split(0.8, Some(42))?;

    let mut classifier = Classifier::new();
    classifier.fit(&train.x, &train.y)?;

    let predictions = classifier.predict(&test.x)?;
    println!(
        "holdout accuracy: {:.3} ({} train / {} test records)",
        accuracy_score(&test.y.to_vec(), &predictions.to_vec()),
        train.n_records(),
        test.n_records()
    );

    Ok(())
}
