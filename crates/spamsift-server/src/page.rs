//! HTML rendering for the single-page prediction UI.
//!
//! `GET /` serves the bare input form; `POST /predict` serves the same page
//! with the result section filled in. All three request outcomes (classified,
//! empty input, internal failure) render through the same [`ResultView`] so
//! the page template has exactly one shape.

use spamsift_core::PredictOutcome;

// ---------------------------------------------------------------------------
// Result view
// ---------------------------------------------------------------------------

/// Flattened, display-ready form of a [`PredictOutcome`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// Verdict line: `SPAM`, `HAM (Not Spam)`, `Error`, or `Internal Error`.
    pub prediction: String,
    /// Spam probability formatted as a percentage, e.g. `"81.45%"`.
    pub probability: String,
    /// Status line: `Success`, the empty-input hint, or a failure detail.
    pub status: String,
    /// The submitted message, echoed back above the verdict.
    pub message: String,
}

impl ResultView {
    /// Map an outcome (plus the raw submitted message) to its display form.
    #[must_use]
    pub fn from_outcome(outcome: &PredictOutcome, message: &str) -> Self {
        match outcome {
            PredictOutcome::Classified(prediction) => Self {
                prediction: prediction.label.ui_label().to_string(),
                probability: prediction.probability_percent(),
                status: "Success".to_string(),
                message: message.to_string(),
            },
            PredictOutcome::EmptyInput => Self {
                prediction: "Error".to_string(),
                probability: "0.00%".to_string(),
                status: "Please enter a message.".to_string(),
                message: String::new(),
            },
            PredictOutcome::Failed { detail } => Self {
                prediction: "Internal Error".to_string(),
                probability: "0.00%".to_string(),
                status: format!("Prediction failed: {detail}"),
                message: message.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the form page with no result section.
#[must_use]
pub fn render_index() -> String {
    render_page(None)
}

/// Render the form page with the result section filled in.
#[must_use]
pub fn render_result(view: &ResultView) -> String {
    render_page(Some(view))
}

fn render_page(result: Option<&ResultView>) -> String {
    let result_block = match result {
        Some(view) => format!(
            r#"    <div class="result">
      <p class="message">{message}</p>
      <p class="prediction">{prediction}</p>
      <p class="probability">Spam probability: {probability}</p>
      <p class="status">{status}</p>
    </div>
"#,
            message = escape_html(&view.message),
            prediction = escape_html(&view.prediction),
            probability = escape_html(&view.probability),
            status = escape_html(&view.status),
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>SpamSift</title>
    <style>
      body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
      textarea {{ width: 100%; box-sizing: border-box; }}
      .result {{ margin-top: 1.5rem; padding: 1rem; border: 1px solid #ccc; }}
      .prediction {{ font-size: 1.4rem; font-weight: bold; }}
      .message {{ color: #555; }}
    </style>
  </head>
  <body>
    <h1>Spam Classifier</h1>
    <form action="/predict" method="post">
      <textarea name="message" rows="4" placeholder="Paste a message to classify"></textarea>
      <button type="submit">Classify</button>
    </form>
{result_block}  </body>
</html>
"#
    )
}

/// Escape text for safe embedding in HTML element content.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spamsift_core::{Label, Prediction};

    // -- escaping ----------------------------------------------------------

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("win money now"), "win money now");
    }

    #[test]
    fn test_escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<b>"free" & 'easy'</b>"#),
            "&lt;b&gt;&quot;free&quot; &amp; &#39;easy&#39;&lt;/b&gt;"
        );
    }

    // -- outcome mapping ---------------------------------------------------

    #[test]
    fn test_view_for_classified_spam() {
        let outcome = PredictOutcome::Classified(Prediction {
            label: Label::Spam,
            spam_probability: 0.9731,
        });
        let view = ResultView::from_outcome(&outcome, "win money now");
        assert_eq!(view.prediction, "SPAM");
        assert_eq!(view.probability, "97.31%");
        assert_eq!(view.status, "Success");
        assert_eq!(view.message, "win money now");
    }

    #[test]
    fn test_view_for_classified_ham() {
        let outcome = PredictOutcome::Classified(Prediction {
            label: Label::Ham,
            spam_probability: 0.1257,
        });
        let view = ResultView::from_outcome(&outcome, "see you tomorrow");
        assert_eq!(view.prediction, "HAM (Not Spam)");
        assert_eq!(view.probability, "12.57%");
        assert_eq!(view.status, "Success");
    }

    #[test]
    fn test_view_for_empty_input() {
        let view = ResultView::from_outcome(&PredictOutcome::EmptyInput, "   ");
        assert_eq!(view.prediction, "Error");
        assert_eq!(view.probability, "0.00%");
        assert_eq!(view.status, "Please enter a message.");
        assert_eq!(view.message, "");
    }

    #[test]
    fn test_view_for_failure() {
        let outcome = PredictOutcome::Failed {
            detail: "feature vector length 3 does not match trained feature count 14".to_string(),
        };
        let view = ResultView::from_outcome(&outcome, "hello");
        assert_eq!(view.prediction, "Internal Error");
        assert!(view.status.starts_with("Prediction failed: "));
        assert!(view.status.contains("feature vector length"));
    }

    // -- page rendering ----------------------------------------------------

    #[test]
    fn test_index_has_form_and_no_result() {
        let html = render_index();
        assert!(html.contains(r#"<form action="/predict" method="post">"#));
        assert!(html.contains(r#"name="message""#));
        assert!(!html.contains(r#"class="result""#));
    }

    #[test]
    fn test_result_page_keeps_the_form() {
        let outcome = PredictOutcome::Classified(Prediction {
            label: Label::Spam,
            spam_probability: 0.8145,
        });
        let html = render_result(&ResultView::from_outcome(&outcome, "free money"));
        assert!(html.contains(r#"<form action="/predict" method="post">"#));
        assert!(html.contains("SPAM"));
        assert!(html.contains("81.45%"));
        assert!(html.contains("free money"));
    }

    #[test]
    fn test_result_page_escapes_the_message() {
        let outcome = PredictOutcome::Classified(Prediction {
            label: Label::Ham,
            spam_probability: 0.5,
        });
        let html = render_result(&ResultView::from_outcome(
            &outcome,
            "<script>alert(1)</script>",
        ));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
