use axum::{
    body::Bytes,
    routing::post,
    Router,
    extract::State,
    response::Response,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::api::models::{SummaryRequest, SummaryResponse};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

// The body is decoded by hand so a malformed payload is reported in the
// `{ error }` shape with a 500, like every other unexpected fault.
async fn summarize_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let start_time = std::time::Instant::now();

    let result = process_summary_request(&state, &body).await;

    let elapsed = start_time.elapsed();
    match &result {
        Ok(_) => tracing::info!(?elapsed, "summary request completed"),
        Err(AppError::Validation(msg)) => tracing::info!(?elapsed, %msg, "summary request rejected"),
        Err(err) => tracing::error!(?elapsed, error = %err, "summary request failed"),
    }

    response::render(result)
}

async fn process_summary_request(state: &AppState, body: &[u8]) -> Result<SummaryResponse> {
    let req = SummaryRequest::from_json(body)?;
    tracing::info!(url = req.url.as_deref().unwrap_or_default(), "processing summary request");

    state.orchestrator.summarize(&req).await
}
