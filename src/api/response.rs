use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::models::SummaryResponse;
use crate::error::Result;

pub fn success(data: SummaryResponse) -> (StatusCode, Json<SummaryResponse>) {
    (StatusCode::OK, Json(data))
}

/// Renders either the success payload or the single-field error body.
pub fn render(result: Result<SummaryResponse>) -> Response {
    match result {
        Ok(data) => success(data).into_response(),
        Err(err) => err.into_response(),
    }
}
