//! Declarative gesture requests and their resolution into timed pointer
//! strokes. Geometry math stays here, per shape; dispatch lives on the
//! input pipeline.

use serde::{Deserialize, Serialize};

use crate::platform::DisplayMetrics;

/// Default press duration for a tap, in milliseconds.
pub const TAP_DURATION_MS: u64 = 100;
/// Default hold duration for a long-press.
pub const LONG_PRESS_DURATION_MS: u64 = 1000;
/// Default travel duration for a swipe.
pub const SWIPE_DURATION_MS: u64 = 500;
/// Default duration for a caller-defined two-finger gesture.
pub const CUSTOM_GESTURE_DURATION_MS: u64 = 500;

// Pinch/zoom is fully auto-computed: fixed duration and inter-finger
// distances, independent of any caller-supplied duration.
const ZOOM_DURATION_MS: u64 = 800;
const ZOOM_START_DISTANCE: f32 = 100.0;
const ZOOM_IN_END_DISTANCE: f32 = 300.0;
const ZOOM_OUT_END_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerPath {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// One finger's contribution to a gesture: a polyline path plus timing.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// At least one point; straight-line interpolation between points.
    pub path: Vec<Point>,
    pub start_delay_ms: u64,
    pub duration_ms: u64,
}

/// Declarative gesture, tagged by shape. Each variant carries only its own
/// required fields and resolves to one or two [`Stroke`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureRequest {
    Tap {
        display_id: i32,
        x: f32,
        y: f32,
        duration_ms: u64,
    },
    LongPress {
        display_id: i32,
        x: f32,
        y: f32,
        duration_ms: u64,
    },
    Swipe {
        display_id: i32,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
        duration_ms: u64,
    },
    Zoom {
        display_id: i32,
        direction: ZoomDirection,
    },
    CustomGesture {
        display_id: i32,
        finger1: FingerPath,
        finger2: FingerPath,
        duration_ms: u64,
    },
}

impl GestureRequest {
    pub fn display_id(&self) -> i32 {
        match *self {
            GestureRequest::Tap { display_id, .. }
            | GestureRequest::LongPress { display_id, .. }
            | GestureRequest::Swipe { display_id, .. }
            | GestureRequest::Zoom { display_id, .. }
            | GestureRequest::CustomGesture { display_id, .. } => display_id,
        }
    }

    /// Resolve the request into timed strokes against the target display's
    /// metrics. Only `Zoom` actually consults the metrics (for the screen
    /// center); the other shapes carry their coordinates explicitly.
    pub fn to_strokes(&self, metrics: &DisplayMetrics) -> Vec<Stroke> {
        match *self {
            // A tap is not a zero-length press: hold at the point and nudge
            // by one unit so the pipeline sees a real path.
            GestureRequest::Tap {
                x, y, duration_ms, ..
            } => vec![Stroke {
                path: vec![Point { x, y }, Point { x: x + 1.0, y: y + 1.0 }],
                start_delay_ms: 0,
                duration_ms,
            }],
            GestureRequest::LongPress {
                x, y, duration_ms, ..
            } => vec![Stroke {
                path: vec![Point { x, y }],
                start_delay_ms: 0,
                duration_ms,
            }],
            GestureRequest::Swipe {
                start_x,
                start_y,
                end_x,
                end_y,
                duration_ms,
                ..
            } => vec![Stroke {
                path: vec![
                    Point {
                        x: start_x,
                        y: start_y,
                    },
                    Point { x: end_x, y: end_y },
                ],
                start_delay_ms: 0,
                duration_ms,
            }],
            GestureRequest::Zoom { direction, .. } => zoom_strokes(metrics, direction),
            GestureRequest::CustomGesture {
                finger1,
                finger2,
                duration_ms,
                ..
            } => vec![
                finger_stroke(finger1, duration_ms),
                finger_stroke(finger2, duration_ms),
            ],
        }
    }
}

fn finger_stroke(finger: FingerPath, duration_ms: u64) -> Stroke {
    Stroke {
        path: vec![finger.start, finger.end],
        start_delay_ms: 0,
        duration_ms,
    }
}

/// Symmetric two-finger pinch about the screen center, both fingers moving
/// along the horizontal axis through the center.
fn zoom_strokes(metrics: &DisplayMetrics, direction: ZoomDirection) -> Vec<Stroke> {
    let center_x = metrics.width as f32 / 2.0;
    let center_y = metrics.height as f32 / 2.0;

    let end_distance = match direction {
        ZoomDirection::In => ZOOM_IN_END_DISTANCE,
        ZoomDirection::Out => ZOOM_OUT_END_DISTANCE,
    };

    let finger1 = FingerPath {
        start: Point {
            x: center_x - ZOOM_START_DISTANCE / 2.0,
            y: center_y,
        },
        end: Point {
            x: center_x - end_distance / 2.0,
            y: center_y,
        },
    };
    let finger2 = FingerPath {
        start: Point {
            x: center_x + ZOOM_START_DISTANCE / 2.0,
            y: center_y,
        },
        end: Point {
            x: center_x + end_distance / 2.0,
            y: center_y,
        },
    };

    vec![
        finger_stroke(finger1, ZOOM_DURATION_MS),
        finger_stroke(finger2, ZOOM_DURATION_MS),
    ]
}
