//! Interactive crop geometry.
//!
//! This module owns everything that happens in display space while the user
//! drags: the crop rect and its invariants, the eight grab handles, and the
//! state machine that applies pointer events to the rect.
//!
//! # Invariants
//!
//! After every transition the rect lies inside the display area, keeps the
//! aspect ratio captured when it was created, and is at least `min_size` on
//! both sides.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = CropEngine::new(Size::new(500.0, 350.0), Size::new(200.0, 150.0), 50.0)?;
//! engine.begin_resize(HandleId::SE, Point::new(350.0, 250.0));
//! engine.update(Point::new(390.0, 290.0));
//! engine.end();
//! assert_eq!(engine.rect().width, 240.0);
//! ```

mod engine;
pub mod handle;
pub mod overlay;
mod types;

pub use engine::CropEngine;
pub use handle::{HandleId, ParseHandleError, ResizeRule};
pub use overlay::{handle_positions, hit_test, shade_regions, Hit, Region};
pub use types::{CropError, CropRect, DragKind, DragSession, ASPECT_EPSILON};
