use serde::Deserialize;

use crate::engine::gesture::{FingerPath, ZoomDirection, CUSTOM_GESTURE_DURATION_MS};

/// Query parameters for tap and long-press. `x`/`y` stay optional so the
/// handler can report the missing-parameter error itself.
#[derive(Debug, Deserialize)]
pub struct PressParams {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeParams {
    pub start_x: Option<f32>,
    pub start_y: Option<f32>,
    pub end_x: Option<f32>,
    pub end_y: Option<f32>,
    pub duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ZoomParams {
    #[serde(rename = "type")]
    pub direction: Option<ZoomDirection>,
}

/// Body of a caller-defined two-finger gesture.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGestureRequest {
    #[serde(default)]
    pub display_id: i32,
    pub finger1: FingerPath,
    pub finger2: FingerPath,
    #[serde(default = "default_custom_duration")]
    pub duration: u64,
}

fn default_custom_duration() -> u64 {
    CUSTOM_GESTURE_DURATION_MS
}

#[derive(Debug, Deserialize)]
pub struct TextInputRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct HierarchyParams {
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationParams {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Seconds the notification stays up.
    pub duration: Option<u64>,
}
