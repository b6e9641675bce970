//! HTTP endpoint serving the trained classifier.
//!
//! One POST route taking the raw text as the request body and returning the
//! predicted label as `"1"` or `"0"`. The trained model, the feature
//! registry, and the tokenizer are process-wide read-only state for the
//! lifetime of the server; nothing writes to them after training.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use crate::analysis::tokenizer::Tokenizer;
use crate::classifier::Classifier;
use crate::corpus::TextRecord;
use crate::error::{JocosaError, Result};
use crate::features::FeatureRegistry;

/// Shared state behind the classification endpoint.
pub struct AppState {
    /// The trained classifier.
    pub classifier: Box<dyn Classifier>,
    /// The feature registry used at training time.
    pub registry: FeatureRegistry,
    /// The tokenizer used at training time.
    pub tokenizer: Box<dyn Tokenizer>,
}

/// Build the router for the classification endpoint.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/classify", post(classify))
        .with_state(state)
}

/// Serve classification requests, blocking the calling thread.
///
/// The rest of the pipeline is synchronous; the tokio runtime lives only
/// inside this call.
pub fn serve_blocking(addr: &str, state: AppState) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(addr, Arc::new(state)))
}

async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("serving classification requests on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// `POST /classify` with the raw text as the body.
async fn classify(
    State(state): State<Arc<AppState>>,
    body: String,
) -> std::result::Result<String, (StatusCode, String)> {
    let mut record = TextRecord::new(body);
    record.preprocess(state.tokenizer.as_ref()).map_err(internal)?;

    let vector = state.registry.vector(&record);
    let predicted = state
        .classifier
        .predict(std::slice::from_ref(&vector))
        .map_err(internal)?;
    let label = predicted.first().copied().unwrap_or(false);

    Ok(if label { "1" } else { "0" }.to_string())
}

fn internal(err: JocosaError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
