//! Held-out evaluation metrics.
//!
//! Confusion-matrix-derived metrics over predicted and ground-truth labels,
//! with spam as the positive class. The false positive rate matters here as
//! much as recall: a false positive is a legitimate message flagged as spam.

use spamsift_core::Label;

/// Metrics computed from a confusion matrix over a held-out split.
#[derive(Debug, Clone)]
pub struct ValidationMetrics {
    /// Fraction of exact label matches.
    pub accuracy: f64,
    /// Of the messages flagged spam, the fraction that were spam.
    pub precision: f64,
    /// Of the spam messages, the fraction that were flagged.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Fraction of ham messages incorrectly flagged as spam.
    pub fpr: f64,
    /// Spam predicted as spam.
    pub tp: usize,
    /// Ham predicted as spam.
    pub fp: usize,
    /// Ham predicted as ham.
    pub tn: usize,
    /// Spam predicted as ham.
    pub fn_count: usize,
}

/// Compute metrics from predicted and ground-truth labels.
///
/// Every ratio guards its zero-denominator case and reports `0.0` instead of
/// NaN, so an empty or one-sided split still produces printable output.
pub fn compute_validation_metrics(predictions: &[Label], labels: &[Label]) -> ValidationMetrics {
    assert_eq!(
        predictions.len(),
        labels.len(),
        "predictions and labels must have same length"
    );

    let mut tp: usize = 0;
    let mut fp: usize = 0;
    let mut tn: usize = 0;
    let mut fn_count: usize = 0;

    for (&pred, &label) in predictions.iter().zip(labels.iter()) {
        match (pred, label) {
            (Label::Spam, Label::Spam) => tp += 1,
            (Label::Spam, Label::Ham) => fp += 1,
            (Label::Ham, Label::Ham) => tn += 1,
            (Label::Ham, Label::Spam) => fn_count += 1,
        }
    }

    let total = (tp + fp + tn + fn_count) as f64;
    let accuracy = if total > 0.0 {
        (tp + tn) as f64 / total
    } else {
        0.0
    };

    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };

    let recall = if tp + fn_count > 0 {
        tp as f64 / (tp + fn_count) as f64
    } else {
        0.0
    };

    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    let fpr = if fp + tn > 0 {
        fp as f64 / (fp + tn) as f64
    } else {
        0.0
    };

    ValidationMetrics {
        accuracy,
        precision,
        recall,
        f1,
        fpr,
        tp,
        fp,
        tn,
        fn_count,
    }
}

impl std::fmt::Display for ValidationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accuracy={:.4} precision={:.4} recall={:.4} f1={:.4} fpr={:.4} (tp={} fp={} tn={} fn={})",
            self.accuracy,
            self.precision,
            self.recall,
            self.f1,
            self.fpr,
            self.tp,
            self.fp,
            self.tn,
            self.fn_count,
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Ham, Spam};

    #[test]
    fn test_perfect_predictions() {
        let preds = vec![Ham, Ham, Spam, Spam];
        let labels = vec![Ham, Ham, Spam, Spam];
        let m = compute_validation_metrics(&preds, &labels);
        assert!((m.accuracy - 1.0).abs() < 1e-9);
        assert!((m.precision - 1.0).abs() < 1e-9);
        assert!((m.recall - 1.0).abs() < 1e-9);
        assert!((m.f1 - 1.0).abs() < 1e-9);
        assert!(m.fpr.abs() < 1e-9);
    }

    #[test]
    fn test_all_wrong() {
        let preds = vec![Spam, Spam, Ham, Ham];
        let labels = vec![Ham, Ham, Spam, Spam];
        let m = compute_validation_metrics(&preds, &labels);
        assert!(m.accuracy.abs() < 1e-9);
        assert!(m.precision.abs() < 1e-9);
        assert!(m.recall.abs() < 1e-9);
        assert!((m.fpr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed() {
        // 3 TP, 1 FP, 2 TN, 1 FN
        let preds = vec![Spam, Spam, Spam, Spam, Ham, Ham, Ham];
        let labels = vec![Spam, Spam, Spam, Ham, Ham, Ham, Spam];
        let m = compute_validation_metrics(&preds, &labels);
        assert_eq!(m.tp, 3);
        assert_eq!(m.fp, 1);
        assert_eq!(m.tn, 2);
        assert_eq!(m.fn_count, 1);
        assert!((m.accuracy - 5.0 / 7.0).abs() < 1e-9);
        assert!((m.precision - 3.0 / 4.0).abs() < 1e-9);
        assert!((m.recall - 3.0 / 4.0).abs() < 1e-9);
        assert!((m.fpr - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let m = compute_validation_metrics(&[], &[]);
        assert!(m.accuracy.abs() < 1e-9);
        assert!(m.f1.abs() < 1e-9);
    }

    #[test]
    fn test_all_spam() {
        let preds = vec![Spam, Spam, Spam];
        let labels = vec![Spam, Spam, Spam];
        let m = compute_validation_metrics(&preds, &labels);
        assert!((m.recall - 1.0).abs() < 1e-9);
        assert!(m.fpr.abs() < 1e-9); // no ham to misflag
    }

    #[test]
    fn test_display_is_printable() {
        let m = compute_validation_metrics(&[Spam, Ham], &[Spam, Ham]);
        let rendered = m.to_string();
        assert!(rendered.contains("accuracy=1.0000"));
        assert!(rendered.contains("tp=1"));
    }
}
