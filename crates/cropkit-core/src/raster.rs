//! Rasterizing a committed crop from the original image.
//!
//! The crop rect lives in display space. On commit it is mapped into natural
//! space with the viewport's scale factors, the region is copied out of the
//! full-resolution pixels, and the result is encoded. The output always has
//! the crop's natural pixel size, never the display size.

use serde::Serialize;

use crate::crop::{CropError, CropRect};
use crate::decode::{DecodedImage, ImageSource};
use crate::encode::{self, OutputFormat};
use crate::viewport::ScaleFactors;

/// A crop region in natural pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NaturalRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An encoded crop ready to hand to the page.
#[derive(Debug, Clone)]
pub struct CropOutput {
    /// Output width in natural pixels.
    pub width: u32,
    /// Output height in natural pixels.
    pub height: u32,
    pub format: OutputFormat,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// The display-space rect the output was cut from.
    pub rect: CropRect,
}

impl CropOutput {
    /// The encoded bytes as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        encode::to_data_url(&self.bytes, self.format)
    }
}

/// Map a display-space rect into a whole-pixel region of a `natural` image.
///
/// Coordinates are rounded to the nearest pixel and the region is clamped to
/// the image.
///
/// # Errors
///
/// Returns `DegenerateRegion` if the mapped region has no area.
pub fn to_natural(
    rect: &CropRect,
    scale: ScaleFactors,
    natural: (u32, u32),
) -> Result<NaturalRegion, CropError> {
    let nx = rect.x * scale.scale_x;
    let ny = rect.y * scale.scale_y;
    let nw = rect.width * scale.scale_x;
    let nh = rect.height * scale.scale_y;

    // Written as negated comparisons so NaN is degenerate too.
    if !(nw > 0.0 && nh > 0.0) {
        log::error!("degenerate crop region {}x{} from {:?}", nw, nh, rect);
        return Err(CropError::DegenerateRegion {
            width: nw,
            height: nh,
        });
    }

    let (natural_width, natural_height) = natural;
    let x = (nx.round().max(0.0) as u32).min(natural_width);
    let y = (ny.round().max(0.0) as u32).min(natural_height);
    let width = (nw.round() as u32).min(natural_width - x);
    let height = (nh.round() as u32).min(natural_height - y);

    if width == 0 || height == 0 {
        log::error!("crop region {:?} maps outside {}x{}", rect, natural_width, natural_height);
        return Err(CropError::DegenerateRegion {
            width: width as f64,
            height: height as f64,
        });
    }

    Ok(NaturalRegion {
        x,
        y,
        width,
        height,
    })
}

/// Copy `region` out of `image` into a new buffer.
///
/// `region` must lie inside the image; [`to_natural`] guarantees that.
pub fn crop_region(image: &DecodedImage, region: NaturalRegion) -> DecodedImage {
    debug_assert!(region.x + region.width <= image.width);
    debug_assert!(region.y + region.height <= image.height);

    let row_bytes = (region.width * 3) as usize;
    let mut output = Vec::with_capacity(row_bytes * region.height as usize);

    // Copy pixel data row by row
    for row in region.y..region.y + region.height {
        let start = ((row as usize) * (image.width as usize) + region.x as usize) * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(region.width, region.height, output)
}

/// Cut the natural-resolution pixels under `rect` out of `source`.
///
/// # Errors
///
/// - `SourceNotReady` if the source has not finished decoding
/// - `InvalidImage` if the pixel buffer does not match the image size
/// - `DegenerateRegion` if the rect maps to an empty region
pub fn extract_region<S: ImageSource + ?Sized>(
    source: &S,
    rect: &CropRect,
    scale: ScaleFactors,
) -> Result<DecodedImage, CropError> {
    let image = source.pixels().ok_or(CropError::SourceNotReady)?;
    if !image.has_valid_buffer() {
        log::error!(
            "pixel buffer of {} bytes does not match {}x{} RGB",
            image.pixels.len(),
            image.width,
            image.height
        );
        return Err(CropError::InvalidImage {
            width: image.width as f64,
            height: image.height as f64,
        });
    }
    let region = to_natural(rect, scale, (image.width, image.height))?;
    Ok(crop_region(image, region))
}

/// Rasterize and encode the crop.
pub fn extract<S: ImageSource + ?Sized>(
    source: &S,
    rect: &CropRect,
    scale: ScaleFactors,
    format: OutputFormat,
) -> Result<CropOutput, CropError> {
    let cropped = extract_region(source, rect, scale)?;
    let bytes = encode::encode(&cropped, format)?;
    log::debug!(
        "rasterized crop {}x{} as {} ({} bytes)",
        cropped.width,
        cropped.height,
        format.mime_type(),
        bytes.len()
    );
    Ok(CropOutput {
        width: cropped.width,
        height: cropped.height,
        format,
        bytes,
        rect: *rect,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
