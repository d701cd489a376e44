//! Artifact persistence and the loaded serving model.
//!
//! A training run persists two JSON files: one for the fitted vectorizer and
//! one for the fitted classifier. Both are stamped with the same run ID, and
//! [`load_model`] refuses a pair that was not produced together or whose
//! dimensions disagree. Vocabulary index order is load-bearing: a vectorizer
//! from one run paired with a classifier from another would produce
//! meaningless features without any visible error, so the mismatch is made
//! loud at load time.

use crate::classifier::MultinomialNb;
use crate::vectorizer::CountVectorizer;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use spamsift_core::{Label, PredictOutcome, Prediction, Result, RunId, SpamSiftError};
use std::path::{Path, PathBuf};

/// Default file name of the vectorizer artifact.
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Default file name of the classifier artifact.
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// On-disk form of the fitted vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Training run this artifact came from.
    pub run_id: RunId,
    /// When the run happened.
    pub trained_at: DateTime<Utc>,
    /// The fitted vectorizer.
    pub vectorizer: CountVectorizer,
}

/// On-disk form of the fitted classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Training run this artifact came from.
    pub run_id: RunId,
    /// When the run happened.
    pub trained_at: DateTime<Utc>,
    /// The fitted classifier.
    pub classifier: MultinomialNb,
}

/// Paths and identity of a persisted artifact pair.
#[derive(Debug, Clone)]
pub struct SavedArtifacts {
    /// Run ID stamped into both files.
    pub run_id: RunId,
    /// Path of the vectorizer artifact.
    pub vectorizer_path: PathBuf,
    /// Path of the classifier artifact.
    pub classifier_path: PathBuf,
}

/// Persist a fitted vectorizer/classifier pair into `output_dir`.
///
/// Mints a fresh run ID, stamps it into both artifacts, and writes
/// [`VECTORIZER_FILE`] and [`CLASSIFIER_FILE`], creating the directory if
/// needed.
pub fn save_artifacts(
    output_dir: &Path,
    vectorizer: &CountVectorizer,
    classifier: &MultinomialNb,
) -> Result<SavedArtifacts> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        SpamSiftError::Artifact(format!(
            "Failed to create {}: {e}",
            output_dir.display()
        ))
    })?;

    let run_id = RunId::new();
    let trained_at = Utc::now();

    let vectorizer_path = output_dir.join(VECTORIZER_FILE);
    let classifier_path = output_dir.join(CLASSIFIER_FILE);

    write_json(
        &vectorizer_path,
        &VectorizerArtifact {
            run_id,
            trained_at,
            vectorizer: vectorizer.clone(),
        },
    )?;
    write_json(
        &classifier_path,
        &ClassifierArtifact {
            run_id,
            trained_at,
            classifier: classifier.clone(),
        },
    )?;

    Ok(SavedArtifacts {
        run_id,
        vectorizer_path,
        classifier_path,
    })
}

/// Load and verify an artifact pair, producing the serving model.
///
/// Fails if either file is absent or unparsable, if the run IDs differ, or
/// if the classifier's feature count does not match the vocabulary size.
pub fn load_model(vectorizer_path: &Path, classifier_path: &Path) -> Result<LoadedModel> {
    let vectorizer: VectorizerArtifact = read_json(vectorizer_path)?;
    let classifier: ClassifierArtifact = read_json(classifier_path)?;

    if vectorizer.run_id != classifier.run_id {
        return Err(SpamSiftError::Artifact(format!(
            "artifact run ids do not match: vectorizer {} vs classifier {}",
            vectorizer.run_id, classifier.run_id
        )));
    }

    let vocabulary_size = vectorizer.vectorizer.vocabulary_size();
    let n_features = classifier.classifier.n_features();
    if n_features != vocabulary_size {
        return Err(SpamSiftError::Artifact(format!(
            "classifier expects {n_features} features but the vocabulary has {vocabulary_size} tokens"
        )));
    }

    Ok(LoadedModel {
        run_id: vectorizer.run_id,
        trained_at: vectorizer.trained_at,
        vectorizer: vectorizer.vectorizer,
        classifier: classifier.classifier,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| {
        SpamSiftError::Artifact(format!("Failed to write {}: {e}", path.display()))
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SpamSiftError::Artifact(format!("Failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        SpamSiftError::Artifact(format!("Failed to parse {}: {e}", path.display()))
    })
}

/// A verified vectorizer/classifier pair held in memory by the service.
///
/// Immutable after loading; safe to share across request handlers behind an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    run_id: RunId,
    trained_at: DateTime<Utc>,
    vectorizer: CountVectorizer,
    classifier: MultinomialNb,
}

impl LoadedModel {
    /// Run ID both artifacts were stamped with.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// When the loaded model was trained.
    #[must_use]
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Number of tokens in the loaded vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Number of classes the classifier distinguishes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classifier.classes().len()
    }

    /// Classify a message, returning the predicted label and the probability
    /// mass on the spam class.
    ///
    /// A message with no vocabulary overlap still classifies: the count
    /// vector is all zeros and the result is driven by the class priors.
    pub fn classify(&self, message: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(message);
        let proba = self.classifier.predict_proba(&features)?;
        let spam_probability = proba[Label::Spam.index()];
        let label = if spam_probability > proba[Label::Ham.index()] {
            Label::Spam
        } else {
            Label::Ham
        };
        Ok(Prediction {
            label,
            spam_probability,
        })
    }

    /// Handle one prediction request, never returning an error.
    ///
    /// Empty or whitespace-only input short-circuits to
    /// [`PredictOutcome::EmptyInput`] without touching the classifier; any
    /// classification error becomes [`PredictOutcome::Failed`] so the caller
    /// keeps serving.
    pub fn classify_outcome(&self, message: &str) -> PredictOutcome {
        if message.trim().is_empty() {
            return PredictOutcome::EmptyInput;
        }
        match self.classify(message) {
            Ok(prediction) => PredictOutcome::Classified(prediction),
            Err(e) => PredictOutcome::Failed {
                detail: e.to_string(),
            },
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
