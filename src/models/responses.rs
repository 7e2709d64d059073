use serde::Serialize;

/// Envelope every JSON endpoint responds with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl ApiResponse<String> {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            result: message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Change-poll result for one display. The acknowledged state id is shared
/// across all pollers; see `AppState::poll_display`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub display_id: i32,
    pub state_id: u64,
    pub has_changed: bool,
}
