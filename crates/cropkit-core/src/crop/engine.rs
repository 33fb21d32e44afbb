//! The crop geometry state machine.
//!
//! `CropEngine` owns the crop rect for one displayed image and moves between
//! two states:
//!
//! ```text
//!   Idle --begin_move/begin_resize--> Dragging --end/cancel--> Idle
//! ```
//!
//! Calls made in the wrong state are ignored and report `false`. Pointer
//! streams from a host are noisy (duplicate pointer-up, stray moves after a
//! leave) and none of that is an error.

use super::handle::{self, HandleId};
use super::types::{CropError, CropRect, DragKind, DragSession};
use crate::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
enum EngineState {
    Idle,
    Dragging(DragSession),
}

/// Aspect-locked crop rect with pointer-driven transitions.
#[derive(Debug, Clone)]
pub struct CropEngine {
    bounds: Size,
    min_size: f64,
    rect: CropRect,
    state: EngineState,
}

impl CropEngine {
    /// Create an engine with a `default_size` rect centered in `display`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if `min_size` is not positive or the default
    /// rect does not fit (see [`CropEngine::reset`]).
    pub fn new(display: Size, default_size: Size, min_size: f64) -> Result<Self, CropError> {
        if !min_size.is_finite() || min_size <= 0.0 {
            return Err(CropError::InvalidBounds(format!(
                "min size must be positive, got {}",
                min_size
            )));
        }
        let rect = initial_rect(display, default_size, min_size)?;
        Ok(Self {
            bounds: display,
            min_size,
            rect,
            state: EngineState::Idle,
        })
    }

    /// Replace the viewport and recreate the default rect centered in it.
    ///
    /// Any active drag session is dropped. The aspect ratio for the new crop
    /// session is `default_size.width / default_size.height`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if the default rect is larger than `display` on
    /// either axis or smaller than the minimum size. The engine is left
    /// unchanged on error.
    pub fn reset(&mut self, display: Size, default_size: Size) -> Result<(), CropError> {
        let rect = initial_rect(display, default_size, self.min_size)?;
        log::debug!(
            "crop reset: {}x{} at ({}, {}) in {}x{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            display.width,
            display.height
        );
        self.bounds = display;
        self.rect = rect;
        self.state = EngineState::Idle;
        Ok(())
    }

    /// Current (or last committed) crop rect.
    pub fn rect(&self) -> CropRect {
        self.rect
    }

    /// Display-space viewport the rect is confined to.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EngineState::Dragging(_))
    }

    /// The active drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            EngineState::Dragging(session) => Some(session),
            EngineState::Idle => None,
        }
    }

    /// Start moving the rect. `pointer` keeps its offset from the rect origin.
    pub fn begin_move(&mut self, pointer: Point) -> bool {
        self.begin(DragKind::Move, pointer - self.rect.origin(), pointer)
    }

    /// Start resizing the rect from `handle`.
    pub fn begin_resize(&mut self, handle: HandleId, pointer: Point) -> bool {
        self.begin(DragKind::Resize(handle), pointer, pointer)
    }

    fn begin(&mut self, kind: DragKind, pointer_anchor: Point, pointer: Point) -> bool {
        if self.is_dragging() || !pointer.is_finite() {
            return false;
        }
        log::debug!("crop drag start: {:?} at ({}, {})", kind, pointer.x, pointer.y);
        self.state = EngineState::Dragging(DragSession {
            kind,
            pointer_anchor,
            rect_snapshot: self.rect,
        });
        true
    }

    /// Recompute the rect for the pointer's current position.
    ///
    /// Returns `true` if the rect changed.
    pub fn update(&mut self, pointer: Point) -> bool {
        let EngineState::Dragging(session) = self.state else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }

        let next = match session.kind {
            DragKind::Move => self.moved(&session, pointer),
            DragKind::Resize(handle) => self.resized(handle, &session, pointer),
        };

        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Finish the drag, keeping the current rect.
    pub fn end(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        log::debug!(
            "crop drag end: {}x{} at ({}, {})",
            self.rect.width,
            self.rect.height,
            self.rect.x,
            self.rect.y
        );
        self.state = EngineState::Idle;
        true
    }

    /// Abandon the drag and restore the rect from before it started.
    pub fn cancel(&mut self) -> bool {
        let EngineState::Dragging(session) = self.state else {
            return false;
        };
        log::debug!("crop drag cancelled");
        self.rect = session.rect_snapshot;
        self.state = EngineState::Idle;
        true
    }

    fn moved(&self, session: &DragSession, pointer: Point) -> CropRect {
        let snapshot = session.rect_snapshot;
        let origin = pointer - session.pointer_anchor;
        CropRect {
            x: clamp_span(origin.x, snapshot.width, self.bounds.width),
            y: clamp_span(origin.y, snapshot.height, self.bounds.height),
            ..snapshot
        }
    }

    fn resized(&self, handle: HandleId, session: &DragSession, pointer: Point) -> CropRect {
        let snapshot = session.rect_snapshot;
        let candidate = handle::resolve(
            handle,
            &snapshot,
            session.pointer_anchor,
            pointer,
            self.min_size,
        );

        let rule = handle.rule();
        let anchor = rule.anchor(&snapshot);
        let size = rule.fit_within(anchor, candidate.size(), self.bounds);
        let origin = rule.place(anchor, size);

        CropRect {
            x: clamp_span(origin.x, size.width, self.bounds.width),
            y: clamp_span(origin.y, size.height, self.bounds.height),
            width: size.width,
            height: size.height,
            aspect_ratio: snapshot.aspect_ratio,
        }
    }
}

/// Clamp the start of a span of `len` so it stays inside `[0, extent]`.
fn clamp_span(start: f64, len: f64, extent: f64) -> f64 {
    start.min(extent - len).max(0.0)
}

fn initial_rect(display: Size, default_size: Size, min_size: f64) -> Result<CropRect, CropError> {
    if !display.is_positive() {
        return Err(CropError::InvalidBounds(format!(
            "display size must be positive, got {}x{}",
            display.width, display.height
        )));
    }
    if !default_size.is_positive() {
        return Err(CropError::InvalidBounds(format!(
            "default crop size must be positive, got {}x{}",
            default_size.width, default_size.height
        )));
    }
    if !display.contains(default_size) {
        log::warn!(
            "default crop {}x{} exceeds display {}x{}",
            default_size.width,
            default_size.height,
            display.width,
            display.height
        );
        return Err(CropError::InvalidBounds(format!(
            "default crop {}x{} exceeds display {}x{}",
            default_size.width, default_size.height, display.width, display.height
        )));
    }
    if default_size.width < min_size || default_size.height < min_size {
        return Err(CropError::InvalidBounds(format!(
            "default crop {}x{} is below the minimum size {}",
            default_size.width, default_size.height, min_size
        )));
    }
    Ok(CropRect::centered(display, default_size))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
