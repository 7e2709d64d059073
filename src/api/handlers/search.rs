//! Scroll-search handler.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::engine::search::{FoundNodeInfo, ScrollSearchRequest};
use crate::error::{AppError, Result};
use crate::models::ApiResponse;

pub async fn scroll_search(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Json(mut request): Json<ScrollSearchRequest>,
) -> Result<Json<ApiResponse<FoundNodeInfo>>> {
    let engine = state.engine()?;

    if request.display_id == 0 {
        request.display_id = display_id;
    }
    if !request.has_matcher() {
        return Err(AppError::BadRequest(
            "At least one matcher is required: resourceId, className, text, description"
                .to_string(),
        ));
    }
    if request.max_retries < 1 {
        return Err(AppError::BadRequest(
            "maxRetries must be at least 1".to_string(),
        ));
    }

    tracing::debug!(
        display_id = request.display_id,
        direction = ?request.direction,
        max_retries = request.max_retries,
        "scroll-search"
    );

    match engine.scroll_search(&request).await {
        Some(found) => Ok(Json(ApiResponse::ok(found))),
        None => Err(AppError::NotFound(
            "Node not found after search".to_string(),
        )),
    }
}
