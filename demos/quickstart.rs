//! Train the default pipeline on a small synthetic dataset and report
//! training accuracy. Run with `RUST_LOG=debug` to see pipeline logging.

use anyhow::Result;
use ndarray::{Array1, Array2};

use grove_classifiers::stats::accuracy_score;
use grove_classifiers::Classifier;

fn main() -> Result<()> {
    env_logger::init();

    // Two well-separated clusters, with a missing value in each cluster.
    let x = Array2::from_shape_vec(
        (8, 2),
        vec![
            1.0, 2.0, //
            1.5, f32::NAN, //
            0.8, 2.2, //
            1.2, 1.9, //
            7.0, 8.0, //
            f32::NAN, 8.2, //
            7.4, 7.8, //
            6.9, 8.1, //
        ],
    )?;
    let y = Array1::from_vec(vec![0, 0, 0, 0, 1, 1, 1, 1]);

    let mut classifier = Classifier::new();
    classifier.fit(&x, &y)?;

    let predictions = classifier.predict(&x)?;
    let proba = classifier.predict_proba(&x)?;

    println!("classes: {:?}", classifier.classes());
    println!("predictions: {:?}", predictions.to_vec());
    println!("first record proba: {:?}", proba.row(0).to_vec());
    println!(
        "training accuracy: {:.3}",
        accuracy_score(&y.to_vec(), &predictions.to_vec())
    );

    Ok(())
}
