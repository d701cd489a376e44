//! Bag-of-words count vectorizer.
//!
//! Fitting builds a vocabulary mapping each training token to a feature
//! index; transformation turns a message into a dense count vector over that
//! vocabulary. Index order is load-bearing for the classifier, so indices
//! are assigned over the sorted token set and never change after fitting.

use crate::tokenize::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A fitted bag-of-words vectorizer.
///
/// The fitted state is exactly what gets persisted in the vectorizer
/// artifact; a loaded instance transforms identically to the one that was
/// fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    /// Vocabulary: token -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl CountVectorizer {
    /// Fit a vectorizer on training documents.
    ///
    /// Indices are assigned in sorted token order, so the same documents
    /// always produce the same vocabulary regardless of input order.
    pub fn fit(documents: &[String]) -> Self {
        let mut tokens = BTreeSet::new();
        for doc in documents {
            tokens.extend(tokenize(doc));
        }

        let vocabulary = tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| (token, idx))
            .collect();

        Self {
            vocabulary,
            n_documents: documents.len(),
        }
    }

    /// Transform a message into a count vector over the fitted vocabulary.
    ///
    /// Tokens outside the vocabulary are dropped silently; a message with no
    /// known tokens yields the all-zero vector. Both are properties of the
    /// bag-of-words representation, not error conditions.
    pub fn transform(&self, message: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokenize(message) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                counts[idx] += 1.0;
            }
        }
        counts
    }

    /// Number of tokens in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fit on.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Feature index of a token, if it is in the vocabulary.
    #[must_use]
    pub fn token_index(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
