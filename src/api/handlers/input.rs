//! Text-injection handlers: fill or clear the focused editable field.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::error::{AppError, Result};
use crate::models::{ApiResponse, TextInputRequest};

pub async fn set_text(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Json(body): Json<TextInputRequest>,
) -> Result<Json<ApiResponse<Value>>> {
    if body.text.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required parameter: text".to_string(),
        ));
    }

    let engine = state.engine()?;
    tracing::debug!(display_id, "input text");

    if engine.input_text(display_id, &body.text) {
        Ok(Json(ApiResponse::ok(json!({
            "action": "inputText",
            "displayId": display_id,
        }))))
    } else {
        Err(AppError::NotFound(
            "Target input not found or not editable".to_string(),
        ))
    }
}

pub async fn clear_text(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>> {
    let engine = state.engine()?;
    tracing::debug!(display_id, "clear input");

    if engine.clear_text(display_id) {
        Ok(Json(ApiResponse::ok(json!({
            "action": "clearInput",
            "displayId": display_id,
        }))))
    } else {
        Err(AppError::NotFound(
            "Target input not found or not editable".to_string(),
        ))
    }
}
