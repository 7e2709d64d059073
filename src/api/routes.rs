use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{actions, displays, health, input, notifications, search};
use super::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Change counter
        .route("/stateId", get(displays::state_id))
        // Displays resource
        .route("/displays/:display_id", get(displays::poll_display))
        .route("/displays/:display_id/hierarchy", get(displays::hierarchy))
        .route("/displays/:display_id/capture", get(displays::capture))
        // Gesture actions
        .route("/displays/:display_id/actions/tap", get(actions::tap))
        .route(
            "/displays/:display_id/actions/longPress",
            get(actions::long_press),
        )
        .route("/displays/:display_id/actions/swipe", get(actions::swipe))
        .route("/displays/:display_id/actions/zoom", get(actions::zoom))
        .route(
            "/displays/:display_id/actions/customZoom",
            post(actions::custom_zoom),
        )
        // Text input
        .route("/displays/:display_id/input/text", post(input::set_text))
        .route("/displays/:display_id/input/clear", get(input::clear_text))
        // Scroll-search
        .route("/displays/:display_id/search", post(search::scroll_search))
        // Notifications collaborator
        .route("/notifications/trigger", get(notifications::trigger));

    Router::new()
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
