//! Platform capability boundary.
//!
//! The engine never talks to an OS accessibility API directly; it goes
//! through the traits in this module. The shipped desktop adapter lives in
//! [`desktop`]; embedders with richer node graphs (or multi-display input
//! pipelines) provide their own implementations.

pub mod desktop;

use tokio::sync::oneshot;

use crate::engine::geometry::Rect;

/// Opaque handle to one live node in the platform's UI graph.
///
/// Handles are reference-counted by the platform: every id returned by
/// [`UiGraph::window_roots`], [`UiGraph::active_window_root`],
/// [`UiGraph::child`] or [`UiGraph::acquire`] must be passed to
/// [`UiGraph::release`] exactly once. Failing to release grows native
/// resources proportionally to tree size per call.
pub type NodeId = u64;

/// The display id that carries the active window when no per-display
/// window set is available.
pub const DEFAULT_DISPLAY: i32 = 0;

/// Live, mutable, reference-counted UI node graph for one device.
///
/// All reads are safe for concurrent callers; the only mutation the engine
/// performs through this trait is releasing handles and issuing scroll /
/// set-text actions.
pub trait UiGraph: Send + Sync {
    /// Roots of all windows currently on `display_id`, each acquired for
    /// the caller.
    fn window_roots(&self, display_id: i32) -> Vec<NodeId>;

    /// Root of the active window, acquired for the caller. Fallback for
    /// [`DEFAULT_DISPLAY`] when the window set is empty.
    fn active_window_root(&self) -> Option<NodeId>;

    /// Acquire an additional handle to an already-held node.
    fn acquire(&self, node: NodeId) -> NodeId;

    /// Release one handle. The id is invalid afterwards.
    fn release(&self, node: NodeId);

    fn child_count(&self, node: NodeId) -> usize;

    /// Acquire the child at `index` in platform traversal order.
    fn child(&self, node: NodeId, index: usize) -> Option<NodeId>;

    fn text(&self, node: NodeId) -> Option<String>;
    fn resource_id(&self, node: NodeId) -> Option<String>;
    fn class_name(&self, node: NodeId) -> Option<String>;
    fn package_name(&self, node: NodeId) -> Option<String>;
    fn content_description(&self, node: NodeId) -> Option<String>;

    /// Node bounds in screen coordinates, read in a single geometry query.
    fn bounds_in_screen(&self, node: NodeId) -> Rect;

    fn is_visible(&self, node: NodeId) -> bool;
    fn is_checkable(&self, node: NodeId) -> bool;
    fn is_checked(&self, node: NodeId) -> bool;
    fn is_clickable(&self, node: NodeId) -> bool;
    fn is_enabled(&self, node: NodeId) -> bool;
    fn is_focusable(&self, node: NodeId) -> bool;
    fn is_focused(&self, node: NodeId) -> bool;
    fn is_scrollable(&self, node: NodeId) -> bool;
    fn is_long_clickable(&self, node: NodeId) -> bool;
    fn is_password(&self, node: NodeId) -> bool;
    fn is_selected(&self, node: NodeId) -> bool;
    fn is_editable(&self, node: NodeId) -> bool;
    fn drawing_order(&self, node: NodeId) -> i32;

    /// Issue a scroll action on the node: forward for down/right, backward
    /// for up/left. Returns whether the platform accepted the action.
    fn perform_scroll(&self, node: NodeId, forward: bool) -> bool;

    /// Replace the node's text content. Returns whether the platform
    /// accepted the action.
    fn set_text(&self, node: NodeId, text: &str) -> bool;
}

/// Scoped ownership of one acquired node handle: dropping the guard
/// releases the handle, on every exit path including propagated failure.
pub struct NodeGuard<'g> {
    graph: &'g dyn UiGraph,
    id: NodeId,
}

impl<'g> NodeGuard<'g> {
    /// Take ownership of an already-acquired handle.
    pub fn new(graph: &'g dyn UiGraph, id: NodeId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Drop for NodeGuard<'_> {
    fn drop(&mut self) {
        self.graph.release(self.id);
    }
}

/// Pixel dimensions of one display, as reported by the input pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMetrics {
    pub width: i32,
    pub height: i32,
}

/// Synthesized-pointer input pipeline.
pub trait InputPipeline: Send + Sync {
    /// Metrics for `display_id`, or `None` when the display is unknown.
    fn display_metrics(&self, display_id: i32) -> Option<DisplayMetrics>;

    /// Hand one or more timed strokes to the platform's input pipeline,
    /// bound to `display_id` where the platform supports per-display
    /// dispatch. Implementations without that support dispatch to the
    /// default display instead; that degradation is silent by contract.
    ///
    /// `true` means the pipeline accepted the gesture, NOT that the target
    /// application reacted. Rejections (gesture already in flight, invalid
    /// coordinates, unsupported stroke count) all report `false` with no
    /// reason code.
    fn dispatch(&self, display_id: i32, strokes: &[crate::engine::gesture::Stroke]) -> bool;
}

/// Decoded capture result: tightly-packed RGBA8 pixels. Dropping the frame
/// releases the buffer.
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Failure categories for screenshot capture. The first five mirror the
/// platform capability's error codes; `Timeout` and `Encode` originate on
/// the bridge side and are surfaced distinctly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("internal capture error")]
    Internal,
    #[error("capture interval too short")]
    RateLimited,
    #[error("invalid display")]
    InvalidDisplay,
    #[error("no capture access")]
    NoAccess,
    #[error("secure window cannot be captured")]
    SecureWindow,
    #[error("capture timed out")]
    Timeout,
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

/// Completion sink for one capture request. Must be completed exactly once;
/// a send after the caller timed out fails harmlessly.
pub type CaptureSink = oneshot::Sender<Result<RawFrame, CaptureError>>;

/// Callback-style screenshot capability.
pub trait ScreenSource: Send + Sync {
    /// Start an asynchronous capture of `display_id` and complete `done`
    /// with the decoded frame or a mapped [`CaptureError`].
    fn capture(&self, display_id: i32, done: CaptureSink);
}

/// Notification presentation collaborator (out of engine scope, consumed
/// only via this contract).
pub trait Notifier: Send + Sync {
    fn show_notification(&self, title: &str, content: &str, duration: std::time::Duration);
}
