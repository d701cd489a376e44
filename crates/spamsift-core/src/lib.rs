//! Core types and errors for spamsift
//!
//! This crate contains the foundational types shared by the training pipeline
//! and the prediction service: class labels, prediction results, the
//! recoverable-outcome type used on the serving path, configuration structs
//! for both binaries, and the crate-wide error taxonomy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Unique identifier for one training run.
///
/// Minted once per run and stamped into both persisted artifacts so the
/// loader can verify they were produced together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RunId {
    /// Create a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Labels & predictions
// ---------------------------------------------------------------------------

/// Class label for a message.
///
/// The label space is exactly {ham, spam}; dataset rows carrying any other
/// category are rejected at training time rather than silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// A legitimate message.
    Ham,
    /// An unwanted message.
    Spam,
}

impl Label {
    /// All labels, in the fixed class-index order used by the classifier.
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// Class index of this label (`Ham` = 0, `Spam` = 1).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Ham => 0,
            Self::Spam => 1,
        }
    }

    /// Human-facing label rendered into the result page.
    #[must_use]
    pub fn ui_label(self) -> &'static str {
        match self {
            Self::Ham => "HAM (Not Spam)",
            Self::Spam => "SPAM",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ham => write!(f, "ham"),
            Self::Spam => write!(f, "spam"),
        }
    }
}

impl std::str::FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ham" => Ok(Self::Ham),
            "spam" => Ok(Self::Spam),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// A single classification produced from a non-empty message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class.
    pub label: Label,
    /// Probability mass assigned to the spam class, in `[0, 1]`.
    pub spam_probability: f64,
}

impl Prediction {
    /// Spam probability formatted as a percentage with two decimal digits,
    /// e.g. `"97.31%"`.
    #[must_use]
    pub fn probability_percent(&self) -> String {
        format!("{:.2}%", self.spam_probability * 100.0)
    }
}

/// Outcome of handling one prediction request.
///
/// This is the recoverable side of the error model: every variant renders
/// into the result page and none of them terminates the process. Fatal
/// conditions (missing or mismatched artifacts at startup) travel through
/// [`Result`] instead, so the two cannot be confused.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// The message was classified.
    Classified(Prediction),
    /// The message was empty or whitespace-only; the classifier was not
    /// invoked.
    EmptyInput,
    /// Vectorization or prediction failed; the detail is surfaced to the
    /// user and the process keeps serving.
    Failed {
        /// Description of the failure.
        detail: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// Configuration for the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Address and port to bind the HTTP server to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Path to the persisted vectorizer artifact.
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: String,
    /// Path to the persisted classifier artifact.
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_vectorizer_path() -> String {
    "models/vectorizer.json".to_string()
}

fn default_classifier_path() -> String {
    "models/classifier.json".to_string()
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            vectorizer_path: default_vectorizer_path(),
            classifier_path: default_classifier_path(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration for one training run.
///
/// The split seed and held-out ratio are deliberate, documented parameters:
/// reruns with the same dataset, seed, and ratio produce identical splits,
/// vocabularies, and model parameters.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Input CSV with `Message`/`Category` columns.
    pub data_path: PathBuf,
    /// Directory the two artifacts are written into.
    pub output_dir: PathBuf,
    /// Fraction of rows held out for evaluation, in `[0, 1)`. A value of
    /// `0.0` trains on everything and skips evaluation.
    pub test_ratio: f64,
    /// Seed for the split shuffle.
    pub seed: u64,
    /// Laplace smoothing strength for the classifier.
    pub alpha: f64,
}

impl TrainConfig {
    /// Create a training configuration with default tunables
    /// (output `models/`, ratio 0.2, seed 42, alpha 1.0).
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_dir: PathBuf::from("models"),
            test_ratio: 0.2,
            seed: 42,
            alpha: 1.0,
        }
    }

    /// Set the artifact output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the held-out ratio.
    pub fn with_test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio;
        self
    }

    /// Set the split shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the Laplace smoothing strength.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `text` (human-readable) or `json` (structured).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Core error types.
#[derive(thiserror::Error, Debug)]
pub enum SpamSiftError {
    /// Dataset loading or validation error.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Artifact persistence or integrity error.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Model fitting or prediction error.
    #[error("Model error: {0}")]
    Model(String),

    /// Serialization / deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias for `std::result::Result<T, SpamSiftError>`.
pub type Result<T> = std::result::Result<T, SpamSiftError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
