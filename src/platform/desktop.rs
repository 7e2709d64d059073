//! Desktop adapter for the platform capability traits, built on the same
//! cross-platform OS-automation crates the rest of the stack uses: `xcap`
//! for monitor/window enumeration and screenshots, `enigo` for pointer
//! playback.
//!
//! Scope: display ids map to monitor indices; the node graph is a
//! depth-one tree (a desktop root whose children are the visible windows),
//! and stroke playback drives the single system pointer, so multi-finger
//! gestures are rejected. Embedders needing deep accessibility trees or
//! true multi-pointer dispatch supply their own trait implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use xcap::{Monitor, Window};

use crate::engine::geometry::Rect;
use crate::engine::gesture::Stroke;
use crate::platform::{
    CaptureError, CaptureSink, DisplayMetrics, InputPipeline, NodeId, Notifier, RawFrame,
    ScreenSource, UiGraph, DEFAULT_DISPLAY,
};

/// Attribute record backing one live node handle. Children are embedded as
/// templates and materialized into handles of their own on [`UiGraph::child`].
#[derive(Debug, Clone, Default)]
struct NodeData {
    text: Option<String>,
    resource_id: Option<String>,
    class_name: Option<String>,
    package_name: Option<String>,
    bounds: Rect,
    visible: bool,
    enabled: bool,
    drawing_order: i32,
    children: Vec<NodeData>,
}

/// Window-enumeration node graph. Roots snapshot the window set at
/// acquisition time; handles are reference-counted through a live table so
/// the engine's acquire/release discipline is exercised for real.
#[derive(Default)]
pub struct DesktopGraph {
    live: Mutex<HashMap<NodeId, NodeData>>,
    next_id: AtomicU64,
}

impl DesktopGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, data: NodeData) -> NodeId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.lock().unwrap().insert(id, data);
        id
    }

    fn read<T>(&self, node: NodeId, f: impl FnOnce(&NodeData) -> T) -> Option<T> {
        self.live.lock().unwrap().get(&node).map(f)
    }

    fn desktop_root(&self) -> Option<NodeData> {
        let monitor = Monitor::all().ok()?.into_iter().find(|m| m.is_primary())?;
        let windows = Window::all().unwrap_or_default();

        let children = windows
            .iter()
            .enumerate()
            .map(|(order, w)| NodeData {
                text: Some(w.title().to_string()),
                resource_id: Some(w.id().to_string()),
                class_name: Some("Window".to_string()),
                package_name: Some(w.app_name().to_string()),
                bounds: Rect::new(
                    w.x(),
                    w.y(),
                    w.x() + w.width() as i32,
                    w.y() + w.height() as i32,
                ),
                visible: !w.is_minimized(),
                enabled: true,
                drawing_order: order as i32,
                children: Vec::new(),
            })
            .collect();

        Some(NodeData {
            text: None,
            resource_id: None,
            class_name: Some("Desktop".to_string()),
            package_name: None,
            bounds: Rect::new(
                monitor.x(),
                monitor.y(),
                monitor.x() + monitor.width() as i32,
                monitor.y() + monitor.height() as i32,
            ),
            visible: true,
            enabled: true,
            drawing_order: 0,
            children,
        })
    }
}

impl UiGraph for DesktopGraph {
    fn window_roots(&self, display_id: i32) -> Vec<NodeId> {
        // Single-display adapter: only the primary desktop has a window set.
        if display_id != DEFAULT_DISPLAY {
            return Vec::new();
        }
        self.desktop_root()
            .map(|root| vec![self.insert(root)])
            .unwrap_or_default()
    }

    fn active_window_root(&self) -> Option<NodeId> {
        self.desktop_root().map(|root| self.insert(root))
    }

    fn acquire(&self, node: NodeId) -> NodeId {
        let data = self
            .read(node, Clone::clone)
            .unwrap_or_default();
        self.insert(data)
    }

    fn release(&self, node: NodeId) {
        if self.live.lock().unwrap().remove(&node).is_none() {
            tracing::warn!(node, "released an unknown node handle");
        }
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.read(node, |n| n.children.len()).unwrap_or(0)
    }

    fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        let child = self.read(node, |n| n.children.get(index).cloned())??;
        Some(self.insert(child))
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.read(node, |n| n.text.clone())?
    }

    fn resource_id(&self, node: NodeId) -> Option<String> {
        self.read(node, |n| n.resource_id.clone())?
    }

    fn class_name(&self, node: NodeId) -> Option<String> {
        self.read(node, |n| n.class_name.clone())?
    }

    fn package_name(&self, node: NodeId) -> Option<String> {
        self.read(node, |n| n.package_name.clone())?
    }

    fn content_description(&self, _node: NodeId) -> Option<String> {
        None
    }

    fn bounds_in_screen(&self, node: NodeId) -> Rect {
        self.read(node, |n| n.bounds).unwrap_or_default()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.read(node, |n| n.visible).unwrap_or(false)
    }

    fn is_checkable(&self, _node: NodeId) -> bool {
        false
    }

    fn is_checked(&self, _node: NodeId) -> bool {
        false
    }

    fn is_clickable(&self, node: NodeId) -> bool {
        // Windows respond to pointer input; the synthetic desktop root
        // does not.
        self.read(node, |n| n.class_name.as_deref() == Some("Window"))
            .unwrap_or(false)
    }

    fn is_enabled(&self, node: NodeId) -> bool {
        self.read(node, |n| n.enabled).unwrap_or(false)
    }

    fn is_focusable(&self, _node: NodeId) -> bool {
        false
    }

    fn is_focused(&self, _node: NodeId) -> bool {
        false
    }

    fn is_scrollable(&self, _node: NodeId) -> bool {
        false
    }

    fn is_long_clickable(&self, _node: NodeId) -> bool {
        false
    }

    fn is_password(&self, _node: NodeId) -> bool {
        false
    }

    fn is_selected(&self, _node: NodeId) -> bool {
        false
    }

    fn is_editable(&self, _node: NodeId) -> bool {
        false
    }

    fn drawing_order(&self, node: NodeId) -> i32 {
        self.read(node, |n| n.drawing_order).unwrap_or(0)
    }

    fn perform_scroll(&self, _node: NodeId, _forward: bool) -> bool {
        false
    }

    fn set_text(&self, _node: NodeId, _text: &str) -> bool {
        false
    }
}

/// Pointer-playback input pipeline. A stroke is played on a background
/// thread: press at the first point, interpolate along the path over the
/// stroke duration, release. Acceptance means the stroke was handed to
/// playback, not that it completed.
#[derive(Default)]
pub struct DesktopInput;

impl DesktopInput {
    pub fn new() -> Self {
        Self
    }
}

fn monitor_at(display_id: i32) -> Option<Monitor> {
    if display_id < 0 {
        return None;
    }
    Monitor::all().ok()?.into_iter().nth(display_id as usize)
}

fn play_stroke(stroke: &Stroke, origin_x: i32, origin_y: i32) -> anyhow::Result<()> {
    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| anyhow::anyhow!("failed to create input backend: {e:?}"))?;

    let first = stroke.path.first().context("empty stroke path")?;
    if stroke.start_delay_ms > 0 {
        thread::sleep(Duration::from_millis(stroke.start_delay_ms));
    }

    enigo
        .move_mouse(
            origin_x + first.x as i32,
            origin_y + first.y as i32,
            Coordinate::Abs,
        )
        .map_err(|e| anyhow::anyhow!("failed to move pointer: {e:?}"))?;
    enigo
        .button(Button::Left, Direction::Press)
        .map_err(|e| anyhow::anyhow!("failed to press: {e:?}"))?;

    let segments = stroke.path.len().saturating_sub(1);
    if segments == 0 {
        thread::sleep(Duration::from_millis(stroke.duration_ms));
    } else {
        let per_segment = stroke.duration_ms / segments as u64;
        for point in &stroke.path[1..] {
            thread::sleep(Duration::from_millis(per_segment));
            enigo
                .move_mouse(
                    origin_x + point.x as i32,
                    origin_y + point.y as i32,
                    Coordinate::Abs,
                )
                .map_err(|e| anyhow::anyhow!("failed to move pointer: {e:?}"))?;
        }
    }

    enigo
        .button(Button::Left, Direction::Release)
        .map_err(|e| anyhow::anyhow!("failed to release: {e:?}"))
}

impl InputPipeline for DesktopInput {
    fn display_metrics(&self, display_id: i32) -> Option<DisplayMetrics> {
        let monitor = monitor_at(display_id)?;
        Some(DisplayMetrics {
            width: monitor.width() as i32,
            height: monitor.height() as i32,
        })
    }

    fn dispatch(&self, display_id: i32, strokes: &[Stroke]) -> bool {
        let [stroke] = strokes else {
            tracing::warn!(
                count = strokes.len(),
                "rejecting gesture: single-pointer pipeline"
            );
            return false;
        };

        // Bind to the target monitor's origin where it resolves; otherwise
        // play against the default display unchanged.
        let (origin_x, origin_y) = monitor_at(display_id)
            .map(|m| (m.x(), m.y()))
            .unwrap_or((0, 0));

        let stroke = stroke.clone();
        thread::spawn(move || {
            if let Err(e) = play_stroke(&stroke, origin_x, origin_y) {
                tracing::error!("stroke playback failed: {e:#}");
            }
        });
        true
    }
}

/// Monitor screenshot source. Capture runs on a background thread and
/// completes the sink with the decoded RGBA frame.
#[derive(Default)]
pub struct DesktopScreen;

impl DesktopScreen {
    pub fn new() -> Self {
        Self
    }
}

fn capture_monitor(display_id: i32) -> Result<RawFrame, CaptureError> {
    let monitor = monitor_at(display_id).ok_or(CaptureError::InvalidDisplay)?;
    let image = monitor.capture_image().map_err(|e| {
        tracing::error!("monitor capture failed: {e}");
        CaptureError::Internal
    })?;
    Ok(RawFrame {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}

impl ScreenSource for DesktopScreen {
    fn capture(&self, display_id: i32, done: CaptureSink) {
        thread::spawn(move || {
            // A late send after the caller timed out fails; nothing to do.
            let _ = done.send(capture_monitor(display_id));
        });
    }
}

/// Log-only notification presenter for hosts without a notification shell.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_notification(&self, title: &str, content: &str, duration: Duration) {
        tracing::info!(title, content, ?duration, "notification triggered");
    }
}
