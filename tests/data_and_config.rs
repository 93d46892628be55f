//! Integration tests for configuration types and dataset handling.

use std::io::Write;

use ndarray::{Array1, Array2};

use grove_classifiers::config::{
    ImputeStrategy, MaxFeatures, ModelConfig, ModelType, PipelineConfig,
};
use grove_classifiers::data_handling::Dataset;
use grove_classifiers::error::ClassifierError;
use grove_classifiers::stats::{accuracy_score, class_counts};

// ---------------------------------------------------------------------------
// Config / ModelType
// ---------------------------------------------------------------------------

#[test]
fn model_type_default_is_random_forest() {
    let ModelType::RandomForest {
        n_estimators,
        max_depth,
        min_samples_split,
        max_features,
        random_state,
    } = ModelType::default();

    assert_eq!(n_estimators, 30);
    assert_eq!(max_depth, 5);
    assert_eq!(min_samples_split, 2);
    assert_eq!(max_features, MaxFeatures::Sqrt);
    assert_eq!(random_state, None);
}

#[test]
fn model_type_from_str_random_forest() {
    let mt: ModelType = "random_forest".parse().unwrap();
    let ModelType::RandomForest { n_estimators, .. } = mt;
    assert_eq!(n_estimators, 30);

    assert!("rf".parse::<ModelType>().is_ok());
}

#[test]
fn model_type_from_str_unknown_errors() {
    let result: Result<ModelType, _> = "gbdt".parse();
    assert!(result.is_err());
}

#[test]
fn impute_strategy_from_str() {
    assert_eq!("mean".parse::<ImputeStrategy>().unwrap(), ImputeStrategy::Mean);
    assert_eq!("Median".parse::<ImputeStrategy>().unwrap(), ImputeStrategy::Median);
    assert!("mode".parse::<ImputeStrategy>().is_err());
}

#[test]
fn pipeline_config_default_values() {
    let cfg = PipelineConfig::default();
    assert_eq!(cfg.imputation, ImputeStrategy::Mean);
    let ModelType::RandomForest { n_estimators, max_depth, .. } = cfg.model.model_type;
    assert_eq!(n_estimators, 30);
    assert_eq!(max_depth, 5);
}

#[test]
fn pipeline_config_serializes_to_json() {
    let cfg = PipelineConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("imputation"));
    assert!(json.contains("RandomForest"));
}

#[test]
fn model_config_round_trips_json() {
    let cfg = ModelConfig::new(ModelType::RandomForest {
        n_estimators: 12,
        max_depth: 3,
        min_samples_split: 4,
        max_features: MaxFeatures::Log2,
        random_state: Some(9),
    });
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: ModelConfig = serde_json::from_str(&json).unwrap();

    let ModelType::RandomForest {
        n_estimators,
        max_depth,
        min_samples_split,
        max_features,
        random_state,
    } = cfg2.model_type;
    assert_eq!(n_estimators, 12);
    assert_eq!(max_depth, 3);
    assert_eq!(min_samples_split, 4);
    assert_eq!(max_features, MaxFeatures::Log2);
    assert_eq!(random_state, Some(9));
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

fn small_dataset() -> Dataset {
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 2.0, //
            1.1, 2.1, //
            0.9, 1.9, //
            8.0, 9.0, //
            8.1, 9.1, //
            7.9, 8.9, //
        ],
    )
    .unwrap();
    let y = Array1::from_vec(vec![0, 0, 0, 1, 1, 1]);
    Dataset::new(x, y, vec!["a".to_string(), "b".to_string()]).unwrap()
}

#[test]
fn dataset_new_validates_shapes() {
    let x = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let y = Array1::from_vec(vec![0]);
    assert!(matches!(
        Dataset::new(x.clone(), y, vec!["a".into(), "b".into()]),
        Err(ClassifierError::LabelLengthMismatch { .. })
    ));

    let y = Array1::from_vec(vec![0, 1]);
    assert!(matches!(
        Dataset::new(x, y, vec!["a".into()]),
        Err(ClassifierError::FeatureCountMismatch { .. })
    ));
}

#[test]
fn train_test_split_partitions_records() {
    let ds = small_dataset();
    let (train, test) = ds.train_test_split(0.5, Some(42)).unwrap();

    assert_eq!(train.n_records(), 3);
    assert_eq!(test.n_records(), 3);
    assert_eq!(train.n_features(), 2);
    assert_eq!(train.feature_names, test.feature_names);
}

#[test]
fn train_test_split_is_reproducible_with_seed() {
    let ds = small_dataset();
    let (train_a, _) = ds.train_test_split(0.5, Some(7)).unwrap();
    let (train_b, _) = ds.train_test_split(0.5, Some(7)).unwrap();
    assert_eq!(train_a.y, train_b.y);
    assert_eq!(train_a.x, train_b.x);
}

#[test]
fn train_test_split_clamps_degenerate_fractions() {
    let ds = small_dataset();

    // Even at 1.0, one record is held out for testing.
    let (train, test) = ds.train_test_split(1.0, Some(3)).unwrap();
    assert_eq!(train.n_records(), 5);
    assert_eq!(test.n_records(), 1);

    // Even at 0.0, one record remains in the training set.
    let (train, test) = ds.train_test_split(0.0, Some(3)).unwrap();
    assert_eq!(train.n_records(), 1);
    assert_eq!(test.n_records(), 5);
}

#[test]
fn train_test_split_rejects_bad_fraction() {
    let ds = small_dataset();
    assert!(matches!(
        ds.train_test_split(1.5, None),
        Err(ClassifierError::InvalidParameter(_))
    ));
}

#[test]
fn dataset_from_csv_parses_missing_values() {
    let mut path = std::env::temp_dir();
    path.push(format!("grove_classifiers_test_{}.csv", std::process::id()));

    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "a,b,label").unwrap();
        writeln!(file, "1.0,2.0,0").unwrap();
        writeln!(file, ",3.0,0").unwrap();
        writeln!(file, "4.0,NA,1").unwrap();
        writeln!(file, "5.0,6.0,1").unwrap();
    }

    let ds = Dataset::from_csv(&path, "label").unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(ds.n_records(), 4);
    assert_eq!(ds.n_features(), 2);
    assert_eq!(ds.feature_names, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(ds.y.to_vec(), vec![0, 0, 1, 1]);
    assert!(ds.x[(1, 0)].is_nan());
    assert!(ds.x[(2, 1)].is_nan());
    assert_eq!(ds.x[(3, 1)], 6.0);
}

#[test]
fn dataset_from_csv_rejects_non_numeric_features() {
    let mut path = std::env::temp_dir();
    path.push(format!("grove_classifiers_badfield_{}.csv", std::process::id()));

    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "a,b,label").unwrap();
        writeln!(file, "1.0,abc,0").unwrap();
    }

    let result = Dataset::from_csv(&path, "label");
    std::fs::remove_file(&path).ok();

    // Only the documented missing-value markers may become NaN; arbitrary
    // junk must surface as a load error, not silently enter the matrix.
    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("bad feature value 'abc'"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn dataset_from_csv_rejects_missing_label_column() {
    let mut path = std::env::temp_dir();
    path.push(format!("grove_classifiers_nolabel_{}.csv", std::process::id()));

    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1.0,2.0").unwrap();
    }

    let result = Dataset::from_csv(&path, "label");
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[test]
fn accuracy_score_counts_matches() {
    let acc = accuracy_score(&[0, 1, 1, 0], &[0, 1, 0, 0]);
    assert!((acc - 0.75).abs() < 1e-6);
}

#[test]
#[should_panic(expected = "equal lengths")]
fn accuracy_score_mismatched_lengths_panics() {
    accuracy_score(&[0, 1], &[0]);
}

#[test]
fn class_counts_are_sorted_by_label() {
    let counts = class_counts(&[3, 1, 3, 2, 1, 3]);
    assert_eq!(counts, vec![(1, 2), (2, 1), (3, 3)]);
}
