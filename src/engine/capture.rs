//! Capture bridge: turns the platform's callback-style screenshot
//! capability into a single awaitable PNG buffer.

use std::io::Cursor;
use std::time::Duration;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tokio::sync::oneshot;

use crate::platform::{CaptureError, RawFrame, ScreenSource};

/// How long the HTTP boundary waits on one capture before giving up.
pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

/// Issue one capture request and await its completion, PNG-encoding the
/// decoded frame.
///
/// Timing out yields [`CaptureError::Timeout`], distinct from any
/// capability-reported category. The timed-out receiver is dropped, so a
/// completion that fires late fails its send harmlessly; the channel is the
/// single-fire guard. The raw frame buffer is dropped on every path,
/// including encoding failure.
pub async fn capture_png(
    screen: &dyn ScreenSource,
    display_id: i32,
    timeout: Duration,
) -> Result<Vec<u8>, CaptureError> {
    let (done, result) = oneshot::channel();
    screen.capture(display_id, done);

    match tokio::time::timeout(timeout, result).await {
        Err(_) => Err(CaptureError::Timeout),
        // The source dropped the sink without completing it.
        Ok(Err(_)) => Err(CaptureError::Internal),
        Ok(Ok(Err(err))) => Err(err),
        Ok(Ok(Ok(frame))) => encode_png(&frame),
    }
}

fn encode_png(frame: &RawFrame) -> Result<Vec<u8>, CaptureError> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.pixels.len() != expected {
        return Err(CaptureError::Encode(format!(
            "frame buffer is {} bytes, expected {} for {}x{} rgba8",
            frame.pixels.len(),
            expected,
            frame.width,
            frame.height
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &frame.pixels,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| CaptureError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::CaptureSink;
    use std::sync::Mutex;

    /// Completes every capture with a scripted result, or parks the sink to
    /// simulate a handler that never fires.
    struct ScriptedScreen {
        result: Option<Result<RawFrame, CaptureError>>,
        parked: Mutex<Option<CaptureSink>>,
    }

    impl ScriptedScreen {
        fn completing(result: Result<RawFrame, CaptureError>) -> Self {
            Self {
                result: Some(result),
                parked: Mutex::new(None),
            }
        }

        fn never_completing() -> Self {
            Self {
                result: None,
                parked: Mutex::new(None),
            }
        }
    }

    impl ScreenSource for ScriptedScreen {
        fn capture(&self, _display_id: i32, done: CaptureSink) {
            match &self.result {
                Some(result) => {
                    let cloned = match result {
                        Ok(frame) => Ok(RawFrame {
                            width: frame.width,
                            height: frame.height,
                            pixels: frame.pixels.clone(),
                        }),
                        Err(e) => Err(e.clone()),
                    };
                    let _ = done.send(cloned);
                }
                None => {
                    *self.parked.lock().unwrap() = Some(done);
                }
            }
        }
    }

    fn tiny_frame() -> RawFrame {
        RawFrame {
            width: 2,
            height: 2,
            pixels: vec![255; 16],
        }
    }

    #[tokio::test]
    async fn test_successful_capture_yields_png_bytes() {
        let screen = ScriptedScreen::completing(Ok(tiny_frame()));
        let bytes = capture_png(&screen, 0, CAPTURE_TIMEOUT).await.unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_capability_error_passes_through() {
        let screen = ScriptedScreen::completing(Err(CaptureError::SecureWindow));
        let err = capture_png(&screen, 0, CAPTURE_TIMEOUT).await.unwrap_err();
        assert_eq!(err, CaptureError::SecureWindow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_when_handler_never_fires() {
        let screen = ScriptedScreen::never_completing();
        let err = capture_png(&screen, 0, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::Timeout);

        // The receiver is gone: no handler registration survives the
        // timeout, and a late completion cannot land anywhere.
        let parked = screen.parked.lock().unwrap().take().unwrap();
        assert!(parked.is_closed());
        assert!(parked.send(Ok(tiny_frame())).is_err());
    }

    #[tokio::test]
    async fn test_malformed_frame_is_an_encode_error() {
        let screen = ScriptedScreen::completing(Ok(RawFrame {
            width: 4,
            height: 4,
            pixels: vec![0; 3],
        }));
        let err = capture_png(&screen, 0, CAPTURE_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, CaptureError::Encode(_)));
    }
}
