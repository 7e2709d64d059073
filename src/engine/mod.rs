//! The automation engine: UI-tree extraction, gesture synthesis,
//! scroll-search, text injection and screenshot capture against an attached
//! platform.

pub mod capture;
pub mod counter;
pub mod extractor;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod node;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use crate::platform::{CaptureError, InputPipeline, ScreenSource, UiGraph};

use self::gesture::GestureRequest;
use self::node::UiNode;
use self::search::{FoundNodeInfo, ScrollSearchRequest};

/// One long-lived engine instance shared by all concurrent requests. Holds
/// no lock of its own: node-graph reads are concurrent-safe by platform
/// contract, and simultaneous gesture dispatches race at the input pipeline
/// (accepted).
pub struct Automation {
    graph: Arc<dyn UiGraph>,
    input: Arc<dyn InputPipeline>,
    screen: Arc<dyn ScreenSource>,
}

impl Automation {
    pub fn new(
        graph: Arc<dyn UiGraph>,
        input: Arc<dyn InputPipeline>,
        screen: Arc<dyn ScreenSource>,
    ) -> Self {
        Self {
            graph,
            input,
            screen,
        }
    }

    /// Snapshot the display's UI tree, or `None` when no root resolves.
    pub fn json_hierarchy(&self, display_id: i32) -> Option<UiNode> {
        extractor::json_hierarchy(self.graph.as_ref(), display_id)
    }

    /// Render the display's UI tree as attributed XML markup.
    pub fn xml_hierarchy(&self, display_id: i32) -> String {
        extractor::xml_hierarchy(self.graph.as_ref(), display_id)
    }

    /// Synthesize and dispatch a gesture. `true` means the input pipeline
    /// accepted it, not that the target application reacted; an
    /// unresolvable display rejects the gesture.
    pub fn dispatch_gesture(&self, request: &GestureRequest) -> bool {
        let display_id = request.display_id();
        let Some(metrics) = self.input.display_metrics(display_id) else {
            tracing::debug!(display_id, "gesture rejected: unknown display");
            return false;
        };
        let strokes = request.to_strokes(&metrics);
        self.input.dispatch(display_id, &strokes)
    }

    /// Run the bounded scroll-until-found search.
    pub async fn scroll_search(&self, request: &ScrollSearchRequest) -> Option<FoundNodeInfo> {
        search::scroll_search(self.graph.as_ref(), request).await
    }

    /// Whether any node on the display contains `query` as a substring of
    /// its text or content description.
    pub fn contains_text(&self, display_id: i32, query: &str) -> bool {
        let Some(root) = extractor::display_root(self.graph.as_ref(), display_id) else {
            return false;
        };
        search::contains_text(self.graph.as_ref(), root.id(), query)
    }

    /// Set the focused editable field's text on the display.
    pub fn input_text(&self, display_id: i32, text: &str) -> bool {
        input::set_focused_text(self.graph.as_ref(), display_id, text)
    }

    /// Clear the focused editable field on the display.
    pub fn clear_text(&self, display_id: i32) -> bool {
        input::clear_focused_text(self.graph.as_ref(), display_id)
    }

    /// Capture the display as PNG bytes, waiting at most `timeout`.
    pub async fn capture_png(
        &self,
        display_id: i32,
        timeout: Duration,
    ) -> Result<Vec<u8>, CaptureError> {
        capture::capture_png(self.screen.as_ref(), display_id, timeout).await
    }
}
