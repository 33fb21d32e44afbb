//! Core types for image encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default JPEG quality for committed crops.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Output encoding for a committed crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputFormat {
    /// Lossy JPEG with quality 1-100.
    Jpeg { quality: u8 },
    /// Lossless PNG.
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Check that `pixels` is a non-empty RGB8 buffer of `width x height`.
pub(super) fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg { quality: 90 });
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(OutputFormat::Jpeg { quality: 80 }.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_validate_rgb() {
        assert!(validate_rgb(&[0; 12], 2, 2).is_ok());
        assert!(matches!(
            validate_rgb(&[0; 11], 2, 2),
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            validate_rgb(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::EncodingFailed {
            format: "PNG",
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "PNG encoding failed: boom");
    }
}
