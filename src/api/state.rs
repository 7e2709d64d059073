use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::engine::counter::ChangeCounter;
use crate::engine::Automation;
use crate::error::AppError;
use crate::models::DisplayState;
use crate::platform::Notifier;

/// Sentinel for "no poll acknowledged yet".
const NEVER_ACKED: u64 = u64::MAX;

/// Shared application state. The engine slot is empty until a platform
/// attaches, mirroring a bridge that serves requests before its
/// accessibility backend connects; handlers answer 503 in the meantime.
pub struct AppState {
    engine: RwLock<Option<Arc<Automation>>>,

    /// UI-change version stamp, bumped by the platform event feed.
    pub changes: Arc<ChangeCounter>,

    /// Notification presentation collaborator.
    pub notifier: Arc<dyn Notifier>,

    /// Last state id acknowledged by ANY poller. A single shared slot:
    /// concurrent pollers race, and one can consume another's
    /// `hasChanged=true` observation. Accepted limitation.
    last_ack_state_id: AtomicU64,
}

impl AppState {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            engine: RwLock::new(None),
            changes: Arc::new(ChangeCounter::new()),
            notifier,
            last_ack_state_id: AtomicU64::new(NEVER_ACKED),
        }
    }

    pub fn attach_engine(&self, engine: Arc<Automation>) {
        *self.engine.write().unwrap() = Some(engine);
        tracing::info!("automation engine attached");
    }

    pub fn detach_engine(&self) {
        *self.engine.write().unwrap() = None;
        tracing::info!("automation engine detached");
    }

    /// The attached engine, or the 503 error when none is.
    pub fn engine(&self) -> Result<Arc<Automation>, AppError> {
        self.engine
            .read()
            .unwrap()
            .clone()
            .ok_or(AppError::ServiceUnavailable)
    }

    /// Read the current state id and acknowledge it in the shared slot.
    pub fn poll_display(&self, display_id: i32) -> DisplayState {
        let current = self.changes.value();
        let last = self.last_ack_state_id.swap(current, Ordering::Relaxed);
        DisplayState {
            display_id,
            state_id: current,
            has_changed: current != last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct NullNotifier;
    impl Notifier for NullNotifier {
        fn show_notification(&self, _: &str, _: &str, _: Duration) {}
    }

    #[test]
    fn test_engine_missing_is_service_unavailable() {
        let state = AppState::new(Arc::new(NullNotifier));
        assert!(matches!(
            state.engine(),
            Err(AppError::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_poll_reports_change_once_until_next_bump() {
        let state = AppState::new(Arc::new(NullNotifier));

        // First poll acknowledges the initial value.
        assert!(state.poll_display(0).has_changed);
        assert!(!state.poll_display(0).has_changed);

        state.changes.bump();
        let poll = state.poll_display(0);
        assert!(poll.has_changed);
        assert_eq!(poll.state_id, 1);
        assert!(!state.poll_display(0).has_changed);
    }
}
