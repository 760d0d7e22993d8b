//! Mock camera implementation for testing

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::platform::{
    Result,
    error::{CameraError, PlatformError},
    traits::{CameraInterface, CameraSettings, ColorFormat, Frame},
};

#[derive(Debug, Default)]
struct MockCameraState {
    settings: Option<CameraSettings>,
    captures: u32,
    failing: bool,
    short_frames: bool,
    closed: bool,
}

/// Mock camera
///
/// Each capture returns a frame filled with the capture count (mod 256), so
/// tests can tell frames apart. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockCamera {
    state: Arc<Mutex<MockCameraState>>,
}

impl MockCamera {
    /// Create a new mock camera
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockCameraState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make subsequent captures fail
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Make subsequent captures return a truncated buffer
    pub fn set_short_frames(&self, short: bool) {
        self.lock().short_frames = short;
    }

    /// Number of completed captures
    pub fn captures(&self) -> u32 {
        self.lock().captures
    }

    /// Settings applied by the last `configure`
    pub fn settings(&self) -> Option<CameraSettings> {
        self.lock().settings.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl CameraInterface for MockCamera {
    fn configure(&mut self, settings: &CameraSettings) -> Result<()> {
        let mut state = self.lock();
        if state.closed {
            return Err(PlatformError::Camera(CameraError::Closed));
        }
        if settings.framerate == 0 {
            return Err(PlatformError::Camera(CameraError::InvalidSettings));
        }
        state.settings = Some(settings.clone());
        Ok(())
    }

    fn capture_frame(&mut self, width: u32, height: u32, format: ColorFormat) -> Result<Frame> {
        let mut state = self.lock();
        if state.closed {
            return Err(PlatformError::Camera(CameraError::Closed));
        }
        if state.failing {
            return Err(PlatformError::Camera(CameraError::CaptureFailed));
        }
        state.captures += 1;

        let mut frame = Frame::zeroed(width, height, format);
        frame.data.fill((state.captures % 256) as u8);
        if state.short_frames {
            frame.data.truncate(frame.data.len() / 2);
        }
        Ok(frame)
    }

    fn close(&mut self) -> Result<()> {
        self.lock().closed = true;
        Ok(())
    }
}
