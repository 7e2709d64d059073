//! Display resource handlers: change polling, hierarchy snapshots and
//! screenshot capture.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::engine::capture::CAPTURE_TIMEOUT;
use crate::error::{AppError, Result};
use crate::models::{ApiResponse, DisplayState, HierarchyParams};
use crate::platform::CaptureError;

pub async fn state_id(State(state): State<Arc<AppState>>) -> Json<ApiResponse<u64>> {
    Json(ApiResponse::ok(state.changes.value()))
}

pub async fn poll_display(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
) -> Json<ApiResponse<DisplayState>> {
    Json(ApiResponse::ok(state.poll_display(display_id)))
}

pub async fn hierarchy(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Query(params): Query<HierarchyParams>,
) -> Result<Response> {
    let engine = state.engine()?;
    let format = params.format.as_deref().unwrap_or("json");
    tracing::debug!(display_id, format, "hierarchy requested");

    match format {
        "xml" => {
            let markup = engine.xml_hierarchy(display_id);
            Ok((
                [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
                markup,
            )
                .into_response())
        }
        _ => match engine.json_hierarchy(display_id) {
            Some(tree) => Ok(Json(ApiResponse::ok(tree)).into_response()),
            None => Err(AppError::NotFound("Display not found".to_string())),
        },
    }
}

/// Raw-bytes endpoint: PNG on success, plain-text error body otherwise.
pub async fn capture(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
) -> Response {
    let engine = match state.engine() {
        Ok(engine) => engine,
        Err(err) => {
            return (StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response();
        }
    };

    tracing::debug!(display_id, "capture requested");
    match engine.capture_png(display_id, CAPTURE_TIMEOUT).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(err) => {
            tracing::error!(display_id, "capture failed: {err}");
            let status = match err {
                CaptureError::InvalidDisplay => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, format!("Capture failed: {err}")).into_response()
        }
    }
}
