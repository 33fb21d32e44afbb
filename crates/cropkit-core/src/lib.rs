//! Cropkit Core - interactive crop tool library
//!
//! This crate provides the core functionality for the gallery crop tool:
//! mapping an image into a display viewport, an aspect-locked crop rectangle
//! driven by pointer events, and rasterization of the selected region from the
//! original full-resolution image.
//!
//! # Coordinate Spaces
//!
//! - **Display space**: pixels of the down-scaled image the user interacts with.
//!   All crop geometry lives here.
//! - **Natural space**: pixels of the decoded source image. Only the rasterizer
//!   works in natural space.
//!
//! Origin is the top-left corner in both spaces.

pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod raster;
pub mod tool;
pub mod viewport;

pub use config::CropConfig;
pub use crop::{CropEngine, CropError, CropRect, HandleId};
pub use raster::{extract, CropOutput};
pub use tool::{CropTool, PointerEvent};
pub use viewport::{fit, DisplayImage, ScaleFactors};

/// A position in display space.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair. Used for image sizes, viewport boxes and crop sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Both sides are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Check whether `other` fits inside this size on both axes.
    pub fn contains(&self, other: Size) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}
