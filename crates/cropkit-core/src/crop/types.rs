//! Core types for crop geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HandleId;
use crate::encode::EncodeError;
use crate::{Point, Size};

/// Tolerance used when comparing a rect's width/height against its aspect ratio.
pub const ASPECT_EPSILON: f64 = 1e-3;

/// Error types for the crop tool.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source image has zero or garbage dimensions.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: f64, height: f64 },

    /// The configured sizes are inconsistent with the viewport.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// The image source has not finished decoding.
    #[error("Source image is not ready")]
    SourceNotReady,

    /// The crop maps to an empty natural-space region.
    ///
    /// Crop rect invariants make this unreachable; seeing it means the
    /// geometry engine let an invalid rect through.
    #[error("Degenerate crop region: {width}x{height}")]
    DegenerateRegion { width: f64, height: f64 },

    /// Encoding the cropped pixels failed.
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

/// The crop rectangle in display-space pixels.
///
/// `aspect_ratio` is fixed when the rect is created and carried unchanged
/// through every move and resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
}

impl CropRect {
    /// Create a rect whose aspect ratio is taken from `width / height`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            aspect_ratio: width / height,
        }
    }

    /// Center a rect of `size` inside `bounds`.
    pub fn centered(bounds: Size, size: Size) -> Self {
        Self::new(
            (bounds.width - size.width) / 2.0,
            (bounds.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check whether a point lies inside the rect (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Check whether `width / height` still matches the fixed aspect ratio.
    pub fn is_aspect_locked(&self) -> bool {
        (self.width / self.height - self.aspect_ratio).abs() <= ASPECT_EPSILON
    }

    /// Check whether the rect lies inside `[0, bounds.width] x [0, bounds.height]`,
    /// allowing `slack` for floating-point rounding on the far edges.
    pub fn is_within(&self, bounds: Size, slack: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width + slack
            && self.bottom() <= bounds.height + slack
    }
}

/// What a drag session does to the rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragKind {
    Move,
    Resize(HandleId),
}

/// State captured on pointer-down and held until pointer-up.
///
/// Every update is computed from `rect_snapshot` so rounding never accumulates
/// across pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    /// For moves: pointer offset from the rect origin. For resizes: the
    /// pointer position at session start.
    pub pointer_anchor: Point,
    pub rect_snapshot: CropRect,
}
