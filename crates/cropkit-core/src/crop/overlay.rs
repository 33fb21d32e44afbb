//! Geometry for drawing the crop overlay and routing pointer-down events.
//!
//! None of this touches pixels. The host redraws the overlay from these
//! shapes on every pointer-move; the full image is only rasterized on commit.

use serde::{Deserialize, Serialize};

use super::{CropRect, HandleId};
use crate::{Point, Size};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Hit {
    Handle(HandleId),
    Body,
    Outside,
}

/// An axis-aligned region in display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Centre of every handle on `rect`, corners first.
pub fn handle_positions(rect: &CropRect) -> [(HandleId, Point); 8] {
    HandleId::ALL.map(|handle| (handle, handle.rule().handle_position(rect)))
}

/// Resolve which handle (if any) is under `point`.
///
/// A handle is hit when the pointer is within `tolerance` of its centre on
/// both axes. Corners win over edges when both are in range, so small rects
/// stay resizable from the corners.
pub fn hit_test(rect: &CropRect, point: Point, tolerance: f64) -> Hit {
    let nearest = handle_positions(rect)
        .into_iter()
        .filter(|(_, centre)| {
            (point.x - centre.x).abs() <= tolerance && (point.y - centre.y).abs() <= tolerance
        })
        .min_by(|(a, pa), (b, pb)| {
            let da = (point.x - pa.x).hypot(point.y - pa.y);
            let db = (point.x - pb.x).hypot(point.y - pb.y);
            b.is_corner()
                .cmp(&a.is_corner())
                .then(da.total_cmp(&db))
        });

    match nearest {
        Some((handle, _)) => Hit::Handle(handle),
        None if rect.contains(point) => Hit::Body,
        None => Hit::Outside,
    }
}

/// The four shaded strips around the crop: top, bottom, left, right.
///
/// Top and bottom span the full width; left and right fill the band beside
/// the crop. Strips collapse to zero size when the crop touches an edge.
pub fn shade_regions(rect: &CropRect, bounds: Size) -> [Region; 4] {
    let top = Region {
        x: 0.0,
        y: 0.0,
        width: bounds.width,
        height: rect.y,
    };
    let bottom = Region {
        x: 0.0,
        y: rect.bottom(),
        width: bounds.width,
        height: (bounds.height - rect.bottom()).max(0.0),
    };
    let left = Region {
        x: 0.0,
        y: rect.y,
        width: rect.x,
        height: rect.height,
    };
    let right = Region {
        x: rect.right(),
        y: rect.y,
        width: (bounds.width - rect.right()).max(0.0),
        height: rect.height,
    };
    [top, bottom, left, right]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CropRect {
        CropRect::new(150.0, 100.0, 200.0, 150.0)
    }

    #[test]
    fn test_hit_corner() {
        assert_eq!(
            hit_test(&rect(), Point::new(352.0, 248.0), 8.0),
            Hit::Handle(HandleId::SE)
        );
        assert_eq!(
            hit_test(&rect(), Point::new(145.0, 95.0), 8.0),
            Hit::Handle(HandleId::NW)
        );
    }

    #[test]
    fn test_hit_edge_midpoint() {
        assert_eq!(
            hit_test(&rect(), Point::new(250.0, 101.0), 8.0),
            Hit::Handle(HandleId::N)
        );
        assert_eq!(
            hit_test(&rect(), Point::new(149.0, 175.0), 8.0),
            Hit::Handle(HandleId::W)
        );
    }

    #[test]
    fn test_hit_body_and_outside() {
        assert_eq!(hit_test(&rect(), Point::new(200.0, 150.0), 8.0), Hit::Body);
        assert_eq!(hit_test(&rect(), Point::new(10.0, 10.0), 8.0), Hit::Outside);
    }

    #[test]
    fn test_hit_prefers_corner_on_tiny_rect() {
        // 12px wide: the N midpoint is 6px from NW and within tolerance of both
        let tiny = CropRect::new(0.0, 0.0, 12.0, 12.0);
        assert_eq!(
            hit_test(&tiny, Point::new(4.0, 0.0), 8.0),
            Hit::Handle(HandleId::NW)
        );
    }

    #[test]
    fn test_handle_positions_cover_all() {
        let positions = handle_positions(&rect());
        assert_eq!(positions.len(), 8);
        assert!(positions
            .iter()
            .any(|(h, p)| *h == HandleId::NE && *p == Point::new(350.0, 100.0)));
    }

    #[test]
    fn test_shade_regions_cover_outside() {
        let bounds = Size::new(500.0, 350.0);
        let rect = rect();
        let regions = shade_regions(&rect, bounds);
        let shaded: f64 = regions.iter().map(|r| r.width * r.height).sum();
        let expected = bounds.width * bounds.height - rect.width * rect.height;
        assert!((shaded - expected).abs() < 1e-9);
    }

    #[test]
    fn test_shade_regions_collapse_at_edges() {
        let bounds = Size::new(500.0, 350.0);
        let full = CropRect::new(0.0, 0.0, 500.0, 350.0);
        assert!(shade_regions(&full, bounds).iter().all(Region::is_empty));
    }
}
