//! Gesture action handlers. Dispatch results are boolean-only by design:
//! a rejected gesture reports one 500 with no reason code.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::engine::gesture::{
    GestureRequest, ZoomDirection, LONG_PRESS_DURATION_MS, SWIPE_DURATION_MS, TAP_DURATION_MS,
};
use crate::error::{AppError, Result};
use crate::models::{ApiResponse, CustomGestureRequest, PressParams, SwipeParams, ZoomParams};

fn require_duration(duration: u64) -> Result<u64> {
    if duration == 0 {
        return Err(AppError::BadRequest(
            "duration must be greater than zero".to_string(),
        ));
    }
    Ok(duration)
}

fn dispatch(
    state: &AppState,
    request: GestureRequest,
    action: &str,
    ack: Value,
) -> Result<Json<ApiResponse<Value>>> {
    let engine = state.engine()?;
    if engine.dispatch_gesture(&request) {
        Ok(Json(ApiResponse::ok(ack)))
    } else {
        Err(AppError::Internal(anyhow::anyhow!(
            "Failed to execute {action} action"
        )))
    }
}

pub async fn tap(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Query(params): Query<PressParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let (Some(x), Some(y)) = (params.x, params.y) else {
        return Err(AppError::BadRequest(
            "Missing required parameters: x, y".to_string(),
        ));
    };
    let duration = require_duration(params.duration.unwrap_or(TAP_DURATION_MS))?;
    tracing::debug!(display_id, x, y, duration, "tap");

    dispatch(
        &state,
        GestureRequest::Tap {
            display_id,
            x,
            y,
            duration_ms: duration,
        },
        "tap",
        json!({
            "action": "tap",
            "displayId": display_id,
            "x": x,
            "y": y,
            "duration": duration,
        }),
    )
}

pub async fn long_press(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Query(params): Query<PressParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let (Some(x), Some(y)) = (params.x, params.y) else {
        return Err(AppError::BadRequest(
            "Missing required parameters: x, y".to_string(),
        ));
    };
    let duration = require_duration(params.duration.unwrap_or(LONG_PRESS_DURATION_MS))?;
    tracing::debug!(display_id, x, y, duration, "longPress");

    dispatch(
        &state,
        GestureRequest::LongPress {
            display_id,
            x,
            y,
            duration_ms: duration,
        },
        "longPress",
        json!({
            "action": "longPress",
            "displayId": display_id,
            "x": x,
            "y": y,
            "duration": duration,
        }),
    )
}

pub async fn swipe(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Query(params): Query<SwipeParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let (Some(start_x), Some(start_y), Some(end_x), Some(end_y)) =
        (params.start_x, params.start_y, params.end_x, params.end_y)
    else {
        return Err(AppError::BadRequest(
            "Missing required parameters: startX, startY, endX, endY".to_string(),
        ));
    };
    let duration = require_duration(params.duration.unwrap_or(SWIPE_DURATION_MS))?;
    tracing::debug!(display_id, start_x, start_y, end_x, end_y, duration, "swipe");

    dispatch(
        &state,
        GestureRequest::Swipe {
            display_id,
            start_x,
            start_y,
            end_x,
            end_y,
            duration_ms: duration,
        },
        "swipe",
        json!({
            "action": "swipe",
            "displayId": display_id,
            "startX": start_x,
            "startY": start_y,
            "endX": end_x,
            "endY": end_y,
            "duration": duration,
        }),
    )
}

pub async fn zoom(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Query(params): Query<ZoomParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let direction = params.direction.unwrap_or(ZoomDirection::In);
    tracing::debug!(display_id, ?direction, "zoom");

    dispatch(
        &state,
        GestureRequest::Zoom {
            display_id,
            direction,
        },
        "zoom",
        json!({
            "action": "zoom",
            "displayId": display_id,
            "type": direction,
        }),
    )
}

pub async fn custom_zoom(
    State(state): State<Arc<AppState>>,
    Path(display_id): Path<i32>,
    Json(body): Json<CustomGestureRequest>,
) -> Result<Json<ApiResponse<Value>>> {
    // The path display wins unless the body names another one explicitly.
    let display_id = if body.display_id == 0 {
        display_id
    } else {
        body.display_id
    };
    let duration = require_duration(body.duration)?;
    tracing::debug!(display_id, duration, "customZoom");

    dispatch(
        &state,
        GestureRequest::CustomGesture {
            display_id,
            finger1: body.finger1,
            finger2: body.finger2,
            duration_ms: duration,
        },
        "customZoom",
        json!({
            "action": "customZoom",
            "displayId": display_id,
        }),
    )
}
