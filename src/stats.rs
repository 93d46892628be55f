//! Scoring utilities for evaluating classifier output.

/// Fraction of predictions that match the true labels.
///
/// # Arguments
///
/// * `y_true` - The reference labels.
/// * `y_pred` - The predicted labels, aligned with `y_true`.
///
/// # Returns
///
/// The accuracy in [0, 1]. Panics if the slices have unequal lengths or
/// are empty.
pub fn accuracy_score(y_true: &[i32], y_pred: &[i32]) -> f32 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "Labels and predictions must have equal lengths"
    );
    assert!(!y_true.is_empty(), "accuracy_score requires at least one label");

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f32 / y_true.len() as f32
}

/// Per-class counts over a label slice, as (label, count) pairs sorted by label.
pub fn class_counts(y: &[i32]) -> Vec<(i32, usize)> {
    let mut sorted = y.to_vec();
    sorted.sort_unstable();

    let mut counts: Vec<(i32, usize)> = Vec::new();
    for label in sorted {
        match counts.last_mut() {
            Some((l, c)) if *l == label => *c += 1,
            _ => counts.push((label, 1)),
        }
    }
    counts
}
