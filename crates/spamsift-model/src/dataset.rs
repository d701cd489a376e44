//! Dataset loading and seeded stratified splitting.
//!
//! The training input is a CSV with `Message` and `Category` columns.
//! Categories must parse to exactly {spam, ham} (case-insensitive); anything
//! else aborts the run instead of being coerced to one of the classes. The
//! train/test split is stratified per class and shuffled by a seeded RNG, so
//! a given (dataset, ratio, seed) triple always produces the same split.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use spamsift_core::{Label, Result, SpamSiftError};
use std::path::Path;
use tracing::debug;

/// One row of the training CSV, as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
struct DatasetRecord {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Category")]
    category: String,
}

/// A validated dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMessage {
    /// Message text.
    pub message: String,
    /// Parsed class label.
    pub label: Label,
}

/// Train/test split of a dataset.
#[derive(Debug, Clone)]
pub struct DataSplit {
    /// Rows used for fitting.
    pub train: Vec<LabeledMessage>,
    /// Rows held out for evaluation.
    pub test: Vec<LabeledMessage>,
}

/// Load and validate a training CSV.
///
/// Fails on a missing or malformed file, on rows missing either column, on
/// categories outside {spam, ham}, and on a dataset with no rows at all.
/// Error messages carry the 1-based record number of the offending row.
pub fn load_dataset(path: &Path) -> Result<Vec<LabeledMessage>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        SpamSiftError::Dataset(format!("Failed to open {}: {e}", path.display()))
    })?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<DatasetRecord>().enumerate() {
        let record = row.map_err(|e| {
            SpamSiftError::Dataset(format!("record {}: {e}", idx + 1))
        })?;
        let label: Label = record.category.parse().map_err(|e: String| {
            SpamSiftError::Dataset(format!("record {}: {e}", idx + 1))
        })?;
        records.push(LabeledMessage {
            message: record.message,
            label,
        });
    }

    if records.is_empty() {
        return Err(SpamSiftError::Dataset(format!(
            "{} contains no rows",
            path.display()
        )));
    }

    Ok(records)
}

/// Split a dataset into train and test sets, preserving class proportions.
///
/// Each class is shuffled independently with a `ChaCha8` RNG seeded from
/// `seed`, then `round(len * test_ratio)` rows of each go to the test set.
/// A ratio of `0.0` puts every row in the training set.
pub fn stratified_split(
    records: &[LabeledMessage],
    test_ratio: f64,
    seed: u64,
) -> Result<DataSplit> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(SpamSiftError::Config(format!(
            "test ratio must be within [0, 1), got {test_ratio}"
        )));
    }

    let mut ham: Vec<usize> = Vec::new();
    let mut spam: Vec<usize> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        match record.label {
            Label::Ham => ham.push(idx),
            Label::Spam => spam.push(idx),
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ham.shuffle(&mut rng);
    spam.shuffle(&mut rng);

    let test_ham = (ham.len() as f64 * test_ratio).round() as usize;
    let test_spam = (spam.len() as f64 * test_ratio).round() as usize;

    let test: Vec<LabeledMessage> = ham[..test_ham]
        .iter()
        .chain(spam[..test_spam].iter())
        .map(|&idx| records[idx].clone())
        .collect();
    let train: Vec<LabeledMessage> = ham[test_ham..]
        .iter()
        .chain(spam[test_spam..].iter())
        .map(|&idx| records[idx].clone())
        .collect();

    debug!(
        train = train.len(),
        test = test.len(),
        test_ham,
        test_spam,
        "stratified split"
    );

    Ok(DataSplit { train, test })
}

// ===========================================================================
// Tests
// ===========================================================================
