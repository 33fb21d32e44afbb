//! Mapping between the image's natural pixel space and the display viewport.
//!
//! The displayed image is the largest aspect-preserving rectangle that fits
//! inside the configured bounding box. Small images are scaled up to fill it.

use serde::{Deserialize, Serialize};

use crate::crop::CropError;
use crate::Size;

/// Fit a natural image size into `max_box`, preserving aspect ratio.
///
/// # Errors
///
/// - `InvalidImage` if either natural dimension is zero or not finite
/// - `InvalidBounds` if `max_box` is not strictly positive
///
/// # Example
///
/// ```ignore
/// let display = fit(Size::new(2000.0, 1400.0), Size::new(500.0, 350.0))?;
/// assert_eq!(display, Size::new(500.0, 350.0));
/// ```
pub fn fit(natural: Size, max_box: Size) -> Result<Size, CropError> {
    if !natural.is_positive() {
        return Err(CropError::InvalidImage {
            width: natural.width,
            height: natural.height,
        });
    }
    if !max_box.is_positive() {
        return Err(CropError::InvalidBounds(format!(
            "max display box must be positive, got {}x{}",
            max_box.width, max_box.height
        )));
    }

    let scale = (max_box.width / natural.width).min(max_box.height / natural.height);

    // The min() absorbs rounding on the constraining axis.
    Ok(Size::new(
        (natural.width * scale).min(max_box.width),
        (natural.height * scale).min(max_box.height),
    ))
}

/// Ratios between natural and display pixels on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ScaleFactors {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Same factor on both axes.
    pub fn uniform(scale: f64) -> Self {
        Self::new(scale, scale)
    }
}

/// A loaded image: natural dimensions plus the derived display size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayImage {
    pub natural_width: u32,
    pub natural_height: u32,
    pub display: Size,
}

impl DisplayImage {
    /// Fit an image of `natural_width x natural_height` into `max_box`.
    pub fn new(natural_width: u32, natural_height: u32, max_box: Size) -> Result<Self, CropError> {
        let display = fit(Size::new(natural_width as f64, natural_height as f64), max_box)?;
        Ok(Self {
            natural_width,
            natural_height,
            display,
        })
    }

    /// Scale factors from display space to natural space.
    pub fn scale_factors(&self) -> ScaleFactors {
        ScaleFactors::new(
            self.natural_width as f64 / self.display.width,
            self.natural_height as f64 / self.display.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_downscale_exact() {
        let display = fit(Size::new(2000.0, 1400.0), Size::new(500.0, 350.0)).unwrap();
        assert_eq!(display, Size::new(500.0, 350.0));
    }

    #[test]
    fn test_fit_constrained_by_height() {
        // Portrait image into a landscape box
        let display = fit(Size::new(1000.0, 2000.0), Size::new(500.0, 350.0)).unwrap();
        assert_eq!(display.height, 350.0);
        assert!((display.width - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_constrained_by_width() {
        let display = fit(Size::new(4000.0, 1000.0), Size::new(500.0, 350.0)).unwrap();
        assert_eq!(display.width, 500.0);
        assert!((display.height - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_upscales_small_image() {
        let display = fit(Size::new(100.0, 70.0), Size::new(500.0, 350.0)).unwrap();
        assert!((display.width - 500.0).abs() < 1e-9);
        assert!((display.height - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_zero_natural_is_invalid_image() {
        assert!(matches!(
            fit(Size::new(0.0, 100.0), Size::new(500.0, 350.0)),
            Err(CropError::InvalidImage { .. })
        ));
        assert!(matches!(
            fit(Size::new(100.0, 0.0), Size::new(500.0, 350.0)),
            Err(CropError::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_fit_zero_box_is_invalid_bounds() {
        assert!(matches!(
            fit(Size::new(100.0, 100.0), Size::new(0.0, 350.0)),
            Err(CropError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_display_image_scale_factors() {
        let image = DisplayImage::new(2000, 1400, Size::new(500.0, 350.0)).unwrap();
        let scale = image.scale_factors();
        assert_eq!(scale, ScaleFactors::uniform(4.0));
    }

    #[test]
    fn test_display_image_rejects_empty() {
        assert!(DisplayImage::new(0, 0, Size::new(500.0, 350.0)).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
