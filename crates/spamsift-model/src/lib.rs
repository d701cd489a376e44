//! Training pipeline and classification model for spamsift
//!
//! This crate implements the machine-learning side of the system: the shared
//! tokenizer, the bag-of-words vectorizer, the multinomial Naive Bayes
//! classifier, dataset loading and splitting, evaluation metrics, artifact
//! persistence, and the end-to-end training pipeline.
//!
//! The central contract is between [`pipeline::train_and_persist`] and
//! [`artifact::load_model`]: one training run writes a vectorizer artifact
//! and a classifier artifact stamped with the same run ID, and the loader
//! refuses any pair that was not produced together.

pub mod artifact;
pub mod classifier;
pub mod dataset;
pub mod metrics;
pub mod pipeline;
pub mod tokenize;
pub mod vectorizer;

pub use artifact::{load_model, save_artifacts, LoadedModel, SavedArtifacts};
pub use classifier::MultinomialNb;
pub use dataset::{load_dataset, stratified_split, DataSplit, LabeledMessage};
pub use metrics::{compute_validation_metrics, ValidationMetrics};
pub use pipeline::{train_and_persist, TrainingReport};
pub use vectorizer::CountVectorizer;
