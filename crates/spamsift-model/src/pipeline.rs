//! End-to-end training pipeline.
//!
//! One call runs the whole sequence: load and validate the CSV, split with
//! the configured seed and ratio, fit the vectorizer on the training split
//! only, fit the classifier on the vectorized training rows, persist both
//! artifacts under a shared run ID, then evaluate on the held-out split.

use crate::artifact::save_artifacts;
use crate::classifier::MultinomialNb;
use crate::dataset::{load_dataset, stratified_split};
use crate::metrics::{compute_validation_metrics, ValidationMetrics};
use crate::vectorizer::CountVectorizer;
use spamsift_core::{Label, Result, RunId, SpamSiftError, TrainConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// Summary of one training run, for operator reporting.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Run ID stamped into both artifacts.
    pub run_id: RunId,
    /// Total dataset rows.
    pub n_rows: usize,
    /// Rows used for fitting.
    pub n_train: usize,
    /// Rows held out for evaluation.
    pub n_test: usize,
    /// Tokens in the fitted vocabulary.
    pub vocabulary_size: usize,
    /// Held-out metrics, or `None` when the test split was empty.
    pub metrics: Option<ValidationMetrics>,
    /// Where the vectorizer artifact was written.
    pub vectorizer_path: PathBuf,
    /// Where the classifier artifact was written.
    pub classifier_path: PathBuf,
}

/// Train on the configured dataset and persist both artifacts.
///
/// Evaluation happens after persistence, on the held-out split transformed
/// with the training-fitted vectorizer. When the configured ratio leaves the
/// test split empty the evaluation is skipped with a warning rather than
/// reporting all-zero metrics.
pub fn train_and_persist(config: &TrainConfig) -> Result<TrainingReport> {
    info!(path = %config.data_path.display(), "loading dataset");
    let records = load_dataset(&config.data_path)?;
    let n_rows = records.len();

    let split = stratified_split(&records, config.test_ratio, config.seed)?;
    info!(
        train = split.train.len(),
        test = split.test.len(),
        seed = config.seed,
        "split dataset"
    );

    let train_messages: Vec<String> = split.train.iter().map(|r| r.message.clone()).collect();
    let train_labels: Vec<Label> = split.train.iter().map(|r| r.label).collect();

    // The vocabulary comes from the training split only, so held-out tokens
    // cannot leak into the features the classifier is fit on.
    let vectorizer = CountVectorizer::fit(&train_messages);
    if vectorizer.vocabulary_size() == 0 {
        return Err(SpamSiftError::Dataset(
            "training split yields an empty vocabulary".to_string(),
        ));
    }
    info!(vocabulary = vectorizer.vocabulary_size(), "fitted vectorizer");

    let train_rows: Vec<Vec<f64>> = train_messages
        .iter()
        .map(|m| vectorizer.transform(m))
        .collect();
    let classifier = MultinomialNb::fit(&train_rows, &train_labels, config.alpha)?;

    let saved = save_artifacts(&config.output_dir, &vectorizer, &classifier)?;
    info!(
        run_id = %saved.run_id,
        dir = %config.output_dir.display(),
        "persisted artifacts"
    );

    let metrics = if split.test.is_empty() {
        warn!("test split is empty; skipping evaluation");
        None
    } else {
        let predictions = split
            .test
            .iter()
            .map(|r| classifier.predict(&vectorizer.transform(&r.message)))
            .collect::<Result<Vec<Label>>>()?;
        let truth: Vec<Label> = split.test.iter().map(|r| r.label).collect();
        let metrics = compute_validation_metrics(&predictions, &truth);
        info!(%metrics, "held-out evaluation");
        Some(metrics)
    };

    Ok(TrainingReport {
        run_id: saved.run_id,
        n_rows,
        n_train: split.train.len(),
        n_test: split.test.len(),
        vocabulary_size: vectorizer.vocabulary_size(),
        metrics,
        vectorizer_path: saved.vectorizer_path,
        classifier_path: saved.classifier_path,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_model;
    use std::fs;
    use std::path::Path;

    const SEPARABLE_CSV: &str = "\
Message,Category
win free money now,spam
free money prize,spam
claim free money,spam
free money offer,spam
urgent free money,spam
see you at the meeting tomorrow,ham
meeting agenda tomorrow,ham
lunch meeting tomorrow,ham
tomorrow meeting notes,ham
team meeting tomorrow,ham
";

    const FIXTURE_CSV: &str = "\
Message,Category
win money now,spam
let's meet tomorrow,ham
free prize claim now,spam
see you at the meeting,ham
";

    fn write_csv(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("messages.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_train_and_persist_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(dir.path(), SEPARABLE_CSV);
        let config = TrainConfig::new(data).with_output_dir(dir.path().join("models"));

        let report = train_and_persist(&config).unwrap();
        assert_eq!(report.n_rows, 10);
        // round(5 * 0.2) = 1 held out per class
        assert_eq!(report.n_test, 2);
        assert_eq!(report.n_train, 8);
        assert!(report.vocabulary_size > 0);
        assert!(report.vectorizer_path.exists());
        assert!(report.classifier_path.exists());

        let metrics = report.metrics.expect("evaluation should run");
        assert!((metrics.accuracy - 1.0).abs() < 1e-9);

        let model = load_model(&report.vectorizer_path, &report.classifier_path).unwrap();
        assert_eq!(model.run_id(), report.run_id);
    }

    #[test]
    fn test_training_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(dir.path(), SEPARABLE_CSV);

        let first = train_and_persist(
            &TrainConfig::new(&data).with_output_dir(dir.path().join("models_a")),
        )
        .unwrap();
        let second = train_and_persist(
            &TrainConfig::new(&data).with_output_dir(dir.path().join("models_b")),
        )
        .unwrap();

        assert_eq!(first.vocabulary_size, second.vocabulary_size);
        assert_eq!(
            first.metrics.as_ref().unwrap().accuracy,
            second.metrics.as_ref().unwrap().accuracy
        );

        // Identical parameters: the two runs classify a probe identically.
        let model_a = load_model(&first.vectorizer_path, &first.classifier_path).unwrap();
        let model_b = load_model(&second.vectorizer_path, &second.classifier_path).unwrap();
        let probe_a = model_a.classify("free money tomorrow").unwrap();
        let probe_b = model_b.classify("free money tomorrow").unwrap();
        assert_eq!(probe_a.spam_probability, probe_b.spam_probability);
        assert_eq!(probe_a.label, probe_b.label);
    }

    #[test]
    fn test_different_seeds_still_train() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(dir.path(), SEPARABLE_CSV);
        let config = TrainConfig::new(data)
            .with_output_dir(dir.path().join("models"))
            .with_seed(7);

        let report = train_and_persist(&config).unwrap();
        assert_eq!(report.n_train + report.n_test, 10);
    }

    #[test]
    fn test_ratio_zero_skips_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(dir.path(), FIXTURE_CSV);
        let config = TrainConfig::new(data)
            .with_output_dir(dir.path().join("models"))
            .with_test_ratio(0.0);

        let report = train_and_persist(&config).unwrap();
        assert_eq!(report.n_test, 0);
        assert!(report.metrics.is_none());
        assert!(report.vectorizer_path.exists());
    }

    #[test]
    fn test_fixture_messages_classify_as_expected() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(dir.path(), FIXTURE_CSV);
        // Four rows round to an empty test split at any small ratio; train on
        // everything and probe held-out messages directly.
        let config = TrainConfig::new(data)
            .with_output_dir(dir.path().join("models"))
            .with_test_ratio(0.0);

        let report = train_and_persist(&config).unwrap();
        let model = load_model(&report.vectorizer_path, &report.classifier_path).unwrap();

        let spam = model.classify("free money").unwrap();
        assert_eq!(spam.label, Label::Spam);
        assert!(spam.spam_probability > 0.5);

        let ham = model.classify("see you tomorrow").unwrap();
        assert_eq!(ham.label, Label::Ham);
        assert!(ham.spam_probability < 0.5);
    }

    #[test]
    fn test_unknown_category_aborts_training() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_csv(
            dir.path(),
            "Message,Category\nfine,ham\nodd one,promotional\nmore spam,spam\n",
        );
        let config = TrainConfig::new(data).with_output_dir(dir.path().join("models"));

        let err = train_and_persist(&config).unwrap_err();
        assert!(matches!(err, SpamSiftError::Dataset(_)));
        assert!(err.to_string().contains("promotional"));
    }

    #[test]
    fn test_missing_dataset_aborts_training() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainConfig::new(dir.path().join("nope.csv"))
            .with_output_dir(dir.path().join("models"));

        assert!(train_and_persist(&config).is_err());
    }
}
