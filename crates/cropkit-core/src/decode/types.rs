//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Dimensions as displayed after applying this orientation.
    pub fn oriented(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Whether `pixels` holds exactly `width * height` RGB triples.
    pub fn has_valid_buffer(&self) -> bool {
        self.pixels.len() == (self.width as usize) * (self.height as usize) * 3
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Where the crop tool reads natural-resolution pixels from.
///
/// A source knows its natural size as soon as the header has been read, but
/// may not have pixels until decoding finishes.
pub trait ImageSource {
    /// Natural (width, height) in pixels.
    fn natural_size(&self) -> (u32, u32);

    /// Decoded pixels, or `None` while decoding is still in progress.
    fn pixels(&self) -> Option<&DecodedImage>;
}

impl ImageSource for DecodedImage {
    fn natural_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixels(&self) -> Option<&DecodedImage> {
        Some(self)
    }
}

/// An image whose pixels may still be on their way.
#[derive(Debug, Clone)]
pub enum SourceImage {
    /// Header read, pixels not yet decoded.
    Decoding { width: u32, height: u32 },
    /// Fully decoded.
    Ready(DecodedImage),
}

impl ImageSource for SourceImage {
    fn natural_size(&self) -> (u32, u32) {
        match self {
            SourceImage::Decoding { width, height } => (*width, *height),
            SourceImage::Ready(image) => (image.width, image.height),
        }
    }

    fn pixels(&self) -> Option<&DecodedImage> {
        match self {
            SourceImage::Decoding { .. } => None,
            SourceImage::Ready(image) => Some(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_oriented_dimensions() {
        assert_eq!(Orientation::Normal.oriented(6000, 4000), (6000, 4000));
        assert_eq!(Orientation::Rotate90CW.oriented(6000, 4000), (4000, 6000));
        assert_eq!(Orientation::Transverse.oriented(6000, 4000), (4000, 6000));
        assert_eq!(Orientation::Rotate180.oriented(6000, 4000), (6000, 4000));
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
        assert!(!DecodedImage::new(2, 2, vec![0; 12]).is_empty());
    }

    #[test]
    fn test_decoded_image_is_ready_source() {
        let img = DecodedImage::new(4, 3, vec![0; 36]);
        assert_eq!(img.natural_size(), (4, 3));
        assert!(img.pixels().is_some());
    }

    #[test]
    fn test_source_image_states() {
        let pending = SourceImage::Decoding {
            width: 2000,
            height: 1400,
        };
        assert_eq!(pending.natural_size(), (2000, 1400));
        assert!(pending.pixels().is_none());

        let ready = SourceImage::Ready(DecodedImage::new(2, 1, vec![0; 6]));
        assert_eq!(ready.natural_size(), (2, 1));
        assert!(ready.pixels().is_some());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
