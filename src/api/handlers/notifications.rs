//! Notification collaborator handler: fires a test notification through
//! the attached presenter.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::api::state::AppState;
use crate::models::{ApiResponse, NotificationParams};

const DEFAULT_DURATION_SECS: u64 = 30;

pub async fn trigger(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationParams>,
) -> Json<ApiResponse<Value>> {
    let title = params.title.unwrap_or_else(|| "Test Notification".to_string());
    let content = params
        .content
        .unwrap_or_else(|| "This is a test notification".to_string());
    let duration_secs = params.duration.unwrap_or(DEFAULT_DURATION_SECS);

    state
        .notifier
        .show_notification(&title, &content, Duration::from_secs(duration_secs));

    Json(ApiResponse::ok(json!({
        "action": "triggerNotification",
        "title": title,
        "durationSeconds": duration_secs,
    })))
}
