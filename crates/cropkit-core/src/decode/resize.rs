//! Resizing for the on-screen preview under the crop overlay.
//!
//! The preview is only ever shown; the rasterizer always reads from the
//! original image, never from a resized copy.

use super::{DecodeError, DecodedImage, FilterType};
use crate::viewport::DisplayImage;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero.
/// Returns `DecodeError::CorruptedFile` if the pixel buffer does not match
/// the image dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Render the preview for a loaded image at its display size.
///
/// Display sizes are fractional; the preview is rounded to whole pixels
/// (at least 1x1).
pub fn render_display_image(
    image: &DecodedImage,
    display: &DisplayImage,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = display_pixels(display);
    resize(image, width, height, filter)
}

fn display_pixels(display: &DisplayImage) -> (u32, u32) {
    (
        (display.display.width.round() as u32).max(1),
        (display.display.height.round() as u32).max(1),
    )
}
