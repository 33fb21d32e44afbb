//! Grab handles and their aspect-locked resize rules.
//!
//! Each of the eight handles maps to a [`ResizeRule`] describing where the
//! stationary anchor sits on each axis and which pointer displacement drives
//! the new size. The opposite side is derived from the aspect ratio, so every
//! rule produces an aspect-locked rect by construction.
//!
//! ```text
//!   nw ---- n ---- ne
//!   |              |
//!   w              e
//!   |              |
//!   sw ---- s ---- se
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CropRect;
use crate::{Point, Size};

/// One of the eight grab handles on the crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

/// Error returned when parsing an unknown handle name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown crop handle: {0:?}")]
pub struct ParseHandleError(pub String);

impl HandleId {
    /// All handles, corners first.
    pub const ALL: [HandleId; 8] = [
        HandleId::NW,
        HandleId::NE,
        HandleId::SW,
        HandleId::SE,
        HandleId::N,
        HandleId::S,
        HandleId::E,
        HandleId::W,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleId::N => "n",
            HandleId::S => "s",
            HandleId::E => "e",
            HandleId::W => "w",
            HandleId::NE => "ne",
            HandleId::NW => "nw",
            HandleId::SE => "se",
            HandleId::SW => "sw",
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(self, HandleId::NE | HandleId::NW | HandleId::SE | HandleId::SW)
    }

    /// The resize rule for this handle.
    pub fn rule(self) -> ResizeRule {
        use Axis::*;
        use Placement::*;

        let (drive, x, y) = match self {
            HandleId::SE => (Horizontal, Start, Start),
            HandleId::SW => (Horizontal, End, Start),
            HandleId::NE => (Horizontal, Start, End),
            HandleId::NW => (Horizontal, End, End),
            HandleId::E => (Horizontal, Start, Center),
            HandleId::W => (Horizontal, End, Center),
            HandleId::S => (Vertical, Center, Start),
            HandleId::N => (Vertical, Center, End),
        };
        ResizeRule { drive, x, y }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleId {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(HandleId::N),
            "s" => Ok(HandleId::S),
            "e" => Ok(HandleId::E),
            "w" => Ok(HandleId::W),
            "ne" => Ok(HandleId::NE),
            "nw" => Ok(HandleId::NW),
            "se" => Ok(HandleId::SE),
            "sw" => Ok(HandleId::SW),
            _ => Err(ParseHandleError(s.to_string())),
        }
    }
}

/// Which pointer displacement drives the resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Where the anchor sits on one axis, relative to the rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Anchor on the rect's near edge (left/top); the rect extends away from it.
    Start,
    /// Anchor on the axis midpoint; the rect is re-centered on it.
    Center,
    /// Anchor on the rect's far edge (right/bottom).
    End,
}

impl Placement {
    /// Sign applied to the pointer displacement on the driving axis.
    ///
    /// `Center` never drives a resize and contributes nothing.
    fn growth(self) -> f64 {
        match self {
            Placement::Start => 1.0,
            Placement::Center => 0.0,
            Placement::End => -1.0,
        }
    }

    /// Anchor coordinate on this axis for a span `[start, start + len]`.
    fn anchor(self, start: f64, len: f64) -> f64 {
        match self {
            Placement::Start => start,
            Placement::Center => start + len / 2.0,
            Placement::End => start + len,
        }
    }

    /// Span start for a span of `len` placed around `anchor`.
    fn place(self, anchor: f64, len: f64) -> f64 {
        match self {
            Placement::Start => anchor,
            Placement::Center => anchor - len / 2.0,
            Placement::End => anchor - len,
        }
    }

    /// Largest span that fits in `[0, extent]` while keeping `anchor` fixed.
    fn room(self, anchor: f64, extent: f64) -> f64 {
        match self {
            Placement::Start => extent - anchor,
            Placement::Center => 2.0 * anchor.min(extent - anchor),
            Placement::End => anchor,
        }
    }
}

/// How one handle turns a pointer displacement into a new rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRule {
    pub drive: Axis,
    pub x: Placement,
    pub y: Placement,
}

impl ResizeRule {
    /// The point that stays fixed while resizing `rect` with this rule.
    pub fn anchor(&self, rect: &CropRect) -> Point {
        Point::new(
            self.x.anchor(rect.x, rect.width),
            self.y.anchor(rect.y, rect.height),
        )
    }

    /// Where the handle itself is drawn on `rect`: the mirror of the anchor.
    pub fn handle_position(&self, rect: &CropRect) -> Point {
        let mirror = |p: Placement| match p {
            Placement::Start => Placement::End,
            Placement::Center => Placement::Center,
            Placement::End => Placement::Start,
        };
        Point::new(
            mirror(self.x).anchor(rect.x, rect.width),
            mirror(self.y).anchor(rect.y, rect.height),
        )
    }

    /// Candidate size for a pointer `displacement` since session start.
    ///
    /// Both sides are held at or above `min_size`; the result is not yet
    /// clamped to any viewport.
    pub fn resize(&self, snapshot: &CropRect, displacement: Point, min_size: f64) -> Size {
        let aspect = snapshot.aspect_ratio;
        match self.drive {
            Axis::Horizontal => {
                let min_width = min_size.max(min_size * aspect);
                let width = (snapshot.width + self.x.growth() * displacement.x).max(min_width);
                Size::new(width, width / aspect)
            }
            Axis::Vertical => {
                let min_height = min_size.max(min_size / aspect);
                let height = (snapshot.height + self.y.growth() * displacement.y).max(min_height);
                Size::new(height * aspect, height)
            }
        }
    }

    /// Origin of a rect of `size` placed around `anchor`.
    pub fn place(&self, anchor: Point, size: Size) -> Point {
        Point::new(
            self.x.place(anchor.x, size.width),
            self.y.place(anchor.y, size.height),
        )
    }

    /// Uniformly shrink `size` until a rect placed around `anchor` fits in `bounds`.
    ///
    /// Sizes that already fit are returned unchanged. The aspect ratio of
    /// `size` is preserved.
    pub fn fit_within(&self, anchor: Point, size: Size, bounds: Size) -> Size {
        let room_x = self.x.room(anchor.x, bounds.width);
        let room_y = self.y.room(anchor.y, bounds.height);
        let scale = (room_x / size.width).min(room_y / size.height).min(1.0);
        if scale >= 1.0 {
            return size;
        }
        Size::new(size.width * scale, size.height * scale)
    }
}

/// Compute the unclamped rect for dragging `handle` from `pointer_start` to `pointer`.
///
/// The anchor is taken from `snapshot`; the result keeps the snapshot's aspect ratio.
pub fn resolve(
    handle: HandleId,
    snapshot: &CropRect,
    pointer_start: Point,
    pointer: Point,
    min_size: f64,
) -> CropRect {
    let rule = handle.rule();
    let anchor = rule.anchor(snapshot);
    let size = rule.resize(snapshot, pointer - pointer_start, min_size);
    let origin = rule.place(anchor, size);
    CropRect {
        x: origin.x,
        y: origin.y,
        width: size.width,
        height: size.height,
        aspect_ratio: snapshot.aspect_ratio,
    }
}
