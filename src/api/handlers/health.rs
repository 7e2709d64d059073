use axum::Json;
use chrono::Utc;

use crate::models::{ApiResponse, HealthInfo};

pub async fn health_check() -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::ok(HealthInfo {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
