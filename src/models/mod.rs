pub mod classifier_trait;
pub mod factory;
pub mod forest;
pub mod tree;
