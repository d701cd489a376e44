//! Multinomial Naive Bayes classifier over bag-of-words counts.
//!
//! Fitting estimates class log-priors from document frequencies and
//! Laplace-smoothed per-class token log-probabilities from token counts.
//! Prediction scores each class by its joint log-likelihood and converts the
//! scores to probabilities with a log-sum-exp softmax, so a message with no
//! known tokens still gets a defined probability driven by the priors alone.

use serde::{Deserialize, Serialize};
use spamsift_core::{Label, Result, SpamSiftError};

/// A fitted multinomial Naive Bayes classifier.
///
/// The fitted state is exactly what gets persisted in the classifier
/// artifact. Class order is fixed as [`Label::ALL`] (ham, then spam) and the
/// feature axis must match the vocabulary the training vectorizer produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Classes in index order.
    classes: Vec<Label>,
    /// Natural log of each class prior.
    class_log_prior: Vec<f64>,
    /// Per-class, per-feature token log-probabilities, `[class][feature]`.
    feature_log_prob: Vec<Vec<f64>>,
    /// Laplace smoothing strength used at fit time.
    alpha: f64,
    /// Width of the feature axis.
    n_features: usize,
}

impl MultinomialNb {
    /// Fit a classifier on vectorized training rows and their labels.
    ///
    /// Requires at least one example of every class: a single-class dataset
    /// would pin every prediction to that class, which is a data problem the
    /// operator should hear about at training time rather than in serving.
    pub fn fit(rows: &[Vec<f64>], labels: &[Label], alpha: f64) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(SpamSiftError::Model(format!(
                "row count {} does not match label count {}",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() {
            return Err(SpamSiftError::Model("training set is empty".to_string()));
        }
        if alpha <= 0.0 {
            return Err(SpamSiftError::Model(format!(
                "smoothing alpha must be positive, got {alpha}"
            )));
        }

        let n_classes = Label::ALL.len();
        let n_features = rows[0].len();

        let mut class_counts = vec![0usize; n_classes];
        let mut token_totals = vec![vec![0.0f64; n_features]; n_classes];

        for (row, label) in rows.iter().zip(labels.iter()) {
            if row.len() != n_features {
                return Err(SpamSiftError::Model(format!(
                    "inconsistent feature vector length: expected {n_features}, got {}",
                    row.len()
                )));
            }
            let class = label.index();
            class_counts[class] += 1;
            for (feature, &count) in row.iter().enumerate() {
                token_totals[class][feature] += count;
            }
        }

        for (label, &count) in Label::ALL.iter().zip(class_counts.iter()) {
            if count == 0 {
                return Err(SpamSiftError::Model(format!(
                    "training data contains no {label} examples"
                )));
            }
        }

        let n_docs = rows.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&count| (count as f64 / n_docs).ln())
            .collect();

        let feature_log_prob = token_totals
            .iter()
            .map(|totals| {
                let class_total: f64 = totals.iter().sum();
                let denominator = class_total + alpha * n_features as f64;
                totals
                    .iter()
                    .map(|&total| ((total + alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            classes: Label::ALL.to_vec(),
            class_log_prior,
            feature_log_prob,
            alpha,
            n_features,
        })
    }

    /// Predict the most likely class for a count vector.
    ///
    /// Ties break toward the lower class index (ham before spam).
    pub fn predict(&self, features: &[f64]) -> Result<Label> {
        let jll = self.joint_log_likelihood(features)?;
        let mut best = 0;
        for (class, &score) in jll.iter().enumerate() {
            if score > jll[best] {
                best = class;
            }
        }
        Ok(self.classes[best])
    }

    /// Per-class probabilities for a count vector, in class-index order.
    ///
    /// Softmax over the joint log-likelihoods, stabilized by subtracting the
    /// maximum before exponentiating.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(features)?;
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = jll.iter().map(|&score| (score - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        Ok(exp.into_iter().map(|e| e / total).collect())
    }

    /// Probability mass assigned to the spam class for a count vector.
    pub fn spam_probability(&self, features: &[f64]) -> Result<f64> {
        Ok(self.predict_proba(features)?[Label::Spam.index()])
    }

    /// Classes in index order.
    #[must_use]
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Width of the feature axis this classifier was fit on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Laplace smoothing strength used at fit time.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(SpamSiftError::Model(format!(
                "feature vector length {} does not match trained feature count {}",
                features.len(),
                self.n_features
            )));
        }

        Ok((0..self.classes.len())
            .map(|class| {
                let likelihood: f64 = features
                    .iter()
                    .zip(self.feature_log_prob[class].iter())
                    .map(|(&count, &log_prob)| count * log_prob)
                    .sum();
                self.class_log_prior[class] + likelihood
            })
            .collect())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
