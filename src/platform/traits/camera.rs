//! Camera interface trait
//!
//! This module defines the frame source of the environment. Frames are
//! captured synchronously at a fixed output size.

use serde::{Deserialize, Serialize};

use crate::platform::{Result, error::CameraError};

/// Pixel layout of a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// Interleaved 8-bit red, green, blue
    Rgb,
}

impl ColorFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorFormat::Rgb => 3,
        }
    }
}

/// Camera sensor configuration
///
/// Applied once before the first capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Sensor capture resolution (width, height)
    pub sensor_resolution: (u32, u32),
    pub framerate: u32,
    pub exposure_mode: String,
    pub image_effect: String,
    pub meter_mode: String,
    /// Capture through the video port for lower latency
    pub use_video_port: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensor_resolution: (1640, 1232),
            framerate: 30,
            exposure_mode: "sport".into(),
            image_effect: "denoise".into(),
            meter_mode: "backlit".into(),
            use_video_port: true,
        }
    }
}

/// Captured image, row-major, `height` rows of `width` pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub format: ColorFormat,
    pub data: Vec<u8>,
}

impl Frame {
    /// Byte size of a frame with the given geometry
    pub fn expected_len(width: u32, height: u32, format: ColorFormat) -> usize {
        width as usize * height as usize * format.bytes_per_pixel()
    }

    /// Create a black frame
    pub fn zeroed(width: u32, height: u32, format: ColorFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; Self::expected_len(width, height, format)],
        }
    }

    /// Check that the buffer holds exactly one full frame of the given geometry
    ///
    /// # Errors
    ///
    /// Returns `CameraError::FrameSizeMismatch` if the geometry or the buffer
    /// length differ.
    pub fn ensure_shape(&self, width: u32, height: u32, format: ColorFormat) -> Result<()> {
        let expected = Self::expected_len(width, height, format);
        if self.width != width
            || self.height != height
            || self.format != format
            || self.data.len() != expected
        {
            return Err(CameraError::FrameSizeMismatch {
                expected,
                actual: self.data.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Pixel at (`x`, `y`) as a channel slice
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }
}

/// Camera interface trait
pub trait CameraInterface: Send {
    /// Apply sensor settings
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Camera(CameraError::InvalidSettings)` if the
    /// device rejects them.
    fn configure(&mut self, settings: &CameraSettings) -> Result<()>;

    /// Capture one frame resized to `width` x `height`
    ///
    /// Blocks until the frame is complete.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Camera` if the capture fails.
    fn capture_frame(&mut self, width: u32, height: u32, format: ColorFormat) -> Result<Frame>;

    /// Release the device
    fn close(&mut self) -> Result<()>;
}
