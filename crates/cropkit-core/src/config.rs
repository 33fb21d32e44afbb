//! Host-supplied configuration for a crop tool instance.
//!
//! Field names are camelCase on the wire so a plain JS object can be handed
//! straight to the WASM bindings.

use serde::{Deserialize, Serialize};

use crate::crop::CropError;
use crate::encode::OutputFormat;
use crate::Size;

/// Default minimum crop side in display pixels.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;

/// Default distance from a handle centre that still grabs it.
pub const DEFAULT_GRAB_TOLERANCE: f64 = 10.0;

/// Configuration for the crop tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Bounding box the displayed image is fitted into.
    pub max_display_box: Size,
    /// Size of the crop rectangle created on load/reset. Also fixes the aspect ratio.
    pub default_crop_size: Size,
    /// Minimum crop side in display pixels.
    pub min_size: f64,
    /// How close (per axis, display pixels) a press must be to grab a handle.
    pub grab_tolerance: f64,
    /// Encoding applied at commit.
    pub output_format: OutputFormat,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            max_display_box: Size::new(500.0, 350.0),
            default_crop_size: Size::new(200.0, 150.0),
            min_size: DEFAULT_MIN_SIZE,
            grab_tolerance: DEFAULT_GRAB_TOLERANCE,
            output_format: OutputFormat::default(),
        }
    }
}

impl CropConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the engine cannot work with.
    ///
    /// Whether the default crop fits the *display* size can only be checked
    /// once an image is loaded; that happens in [`crate::CropEngine::reset`].
    pub fn validate(&self) -> Result<(), CropError> {
        if !self.max_display_box.is_positive() {
            log::warn!("rejecting max display box {:?}", self.max_display_box);
            return Err(CropError::InvalidBounds(format!(
                "max display box must be positive, got {}x{}",
                self.max_display_box.width, self.max_display_box.height
            )));
        }
        if !self.default_crop_size.is_positive() {
            log::warn!("rejecting default crop size {:?}", self.default_crop_size);
            return Err(CropError::InvalidBounds(format!(
                "default crop size must be positive, got {}x{}",
                self.default_crop_size.width, self.default_crop_size.height
            )));
        }
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            log::warn!("rejecting min size {}", self.min_size);
            return Err(CropError::InvalidBounds(format!(
                "min size must be positive, got {}",
                self.min_size
            )));
        }
        if !self.grab_tolerance.is_finite() || self.grab_tolerance < 0.0 {
            log::warn!("rejecting grab tolerance {}", self.grab_tolerance);
            return Err(CropError::InvalidBounds(format!(
                "grab tolerance must be non-negative, got {}",
                self.grab_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CropConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_size, 50.0);
        assert_eq!(config.output_format, OutputFormat::Jpeg { quality: 90 });
    }

    #[test]
    fn test_rejects_negative_grab_tolerance() {
        let mut config = CropConfig::new();
        config.grab_tolerance = -1.0;
        assert!(matches!(config.validate(), Err(CropError::InvalidBounds(_))));
    }

    #[test]
    fn test_rejects_zero_box() {
        let mut config = CropConfig::new();
        config.max_display_box = Size::new(0.0, 350.0);
        assert!(matches!(config.validate(), Err(CropError::InvalidBounds(_))));
    }

    #[test]
    fn test_rejects_negative_default() {
        let mut config = CropConfig::new();
        config.default_crop_size = Size::new(-10.0, 150.0);
        assert!(matches!(config.validate(), Err(CropError::InvalidBounds(_))));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        use serde::de::value::{Error, MapDeserializer};

        let fields = MapDeserializer::<_, Error>::new([("minSize", 80.0f64)].into_iter());
        let config = CropConfig::deserialize(fields).unwrap();
        assert_eq!(config.min_size, 80.0);
        assert_eq!(config.max_display_box, Size::new(500.0, 350.0));
    }

    #[test]
    fn test_rejects_nan_min_size() {
        let mut config = CropConfig::new();
        config.min_size = f64::NAN;
        assert!(matches!(config.validate(), Err(CropError::InvalidBounds(_))));
    }
}
