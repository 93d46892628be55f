//! grove-classifiers: a small tabular classification pipeline.
//!
//! This crate provides a `Classifier` that chains mean imputation and
//! feature standardization in front of a random-forest model, along with
//! the preprocessing stages, model trait and factory, data handling and
//! scoring utilities that back it.
//!
//! The design favors small, testable modules: preprocessing stages share a
//! `Transform` trait, models share a `ClassifierModel` trait, and the
//! pipeline composes boxed implementations of both.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod stats;

pub use error::ClassifierError;
pub use pipeline::Classifier;
