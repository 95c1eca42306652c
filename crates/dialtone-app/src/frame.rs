//! Decoded video frames.

use thiserror::Error;

/// Bytes per RGBA pixel.
const BYTES_PER_PIXEL: usize = 4;

/// Frame construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

/// A decoded RGBA video frame from the partner's camera.
///
/// Frames are shared between snapshots behind an `Arc`, so a frame is
/// decoded once and never copied by the reducer.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl VideoFrame {
    /// Create a frame from tightly packed RGBA rows.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(BYTES_PER_PIXEL);
        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`. `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let rgba = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        let [r, g, b, a] = rgba else {
            return None;
        };
        Some([*r, *g, *b, *a])
    }
}

// Pixel data is noise in logs.
impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
