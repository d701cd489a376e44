//! Request handlers and shared state for the prediction service.
//!
//! All state is immutable after startup: the loaded vectorizer/classifier
//! pair lives in [`AppState`] behind an `Arc` and is shared read-only by
//! every request, so no locking is needed.

use crate::page::{self, ResultView};
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use spamsift_core::{PredictOutcome, Result, ServeConfig};
use spamsift_model::{load_model, LoadedModel};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state threaded through axum handlers via [`State`].
#[derive(Debug)]
pub struct AppState {
    /// Service configuration.
    pub config: ServeConfig,
    /// Loaded vectorizer + classifier pair.
    pub model: LoadedModel,
}

/// Build the shared [`AppState`] by loading both artifacts from disk.
///
/// # Errors
///
/// Returns an error if either artifact is missing, unreadable, or the pair
/// fails the alignment checks in [`load_model`]. Callers treat this as
/// fatal: the service must not start without a usable model.
pub fn build_app_state(config: ServeConfig) -> Result<Arc<AppState>> {
    let model = load_model(
        Path::new(&config.vectorizer_path),
        Path::new(&config.classifier_path),
    )?;
    Ok(Arc::new(AppState { config, model }))
}

/// Build the axum [`Router`] with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(form_handler))
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Form body for `POST /predict`.
///
/// A missing `message` field is treated the same as an empty one.
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub message: String,
}

/// `GET /` — render the input form.
pub async fn form_handler() -> Html<String> {
    Html(page::render_index())
}

/// `POST /predict` — classify the submitted message and render the result
/// into the same page.
///
/// Every outcome is a 200 with the result section filled in; prediction
/// failures are surfaced to the user and never crash the process.
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let outcome = state.model.classify_outcome(&form.message);
    match &outcome {
        PredictOutcome::Classified(prediction) => {
            debug!(
                label = %prediction.label,
                probability = prediction.spam_probability,
                "classified message"
            );
        }
        PredictOutcome::EmptyInput => debug!("empty message submitted"),
        PredictOutcome::Failed { detail } => warn!(%detail, "prediction failed"),
    }
    let view = ResultView::from_outcome(&outcome, &form.message);
    Html(page::render_result(&view))
}

/// `GET /health` — liveness endpoint with a summary of the loaded model.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "run_id": state.model.run_id().to_string(),
        "trained_at": state.model.trained_at().to_rfc3339(),
        "vocabulary_size": state.model.vocabulary_size(),
        "classes": state.model.class_count(),
    }))
}
