//! The crop tool: one image, one crop rect, one pointer stream.
//!
//! `CropTool` is what a host surface talks to. It fits the image into the
//! viewport on load, routes pointer events into the geometry engine, and
//! rasterizes from the original image on commit.
//!
//! # Example
//!
//! ```ignore
//! let mut tool = CropTool::new(CropConfig::default(), 2000, 1400)?;
//! tool.dispatch(PointerEvent::Down { point: Point::new(350.0, 250.0), handle: Some(HandleId::SE) });
//! tool.dispatch(PointerEvent::Move { point: Point::new(390.0, 290.0) });
//! tool.dispatch(PointerEvent::Up);
//! let output = tool.commit(&decoded)?;
//! assert_eq!((output.width, output.height), (960, 720));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::CropConfig;
use crate::crop::{self, CropEngine, CropError, CropRect, HandleId, Hit, Region};
use crate::decode::ImageSource;
use crate::raster::{self, CropOutput};
use crate::viewport::{DisplayImage, ScaleFactors};
use crate::Point;

/// Pointer input from the host, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Pointer pressed. `handle: None` starts a move.
    Down {
        point: Point,
        handle: Option<HandleId>,
    },
    Move {
        point: Point,
    },
    /// Pointer released: keep the dragged rect.
    Up,
    /// Pointer left the surface (or escape): revert the drag.
    Leave,
}

/// A crop tool instance editing a single image.
#[derive(Debug, Clone)]
pub struct CropTool {
    config: CropConfig,
    image: DisplayImage,
    engine: CropEngine,
}

impl CropTool {
    /// Create a tool for an image of `natural_width x natural_height`.
    ///
    /// # Errors
    ///
    /// - `InvalidBounds` if the configuration is inconsistent
    /// - `InvalidImage` if either dimension is zero
    pub fn new(
        config: CropConfig,
        natural_width: u32,
        natural_height: u32,
    ) -> Result<Self, CropError> {
        config.validate()?;
        let image = DisplayImage::new(natural_width, natural_height, config.max_display_box)?;
        let engine = CropEngine::new(image.display, config.default_crop_size, config.min_size)?;
        log::debug!(
            "crop tool for {}x{} image, display {}x{}",
            natural_width,
            natural_height,
            image.display.width,
            image.display.height
        );
        Ok(Self {
            config,
            image,
            engine,
        })
    }

    /// Replace the image being edited and start a fresh crop session.
    ///
    /// The tool is unchanged if the new image is rejected.
    pub fn load(&mut self, natural_width: u32, natural_height: u32) -> Result<(), CropError> {
        let image = DisplayImage::new(
            natural_width,
            natural_height,
            self.config.max_display_box,
        )?;
        self.engine
            .reset(image.display, self.config.default_crop_size)?;
        self.image = image;
        Ok(())
    }

    /// Recenter the default crop rect, discarding any drag in progress.
    pub fn reset(&mut self) -> Result<(), CropError> {
        self.engine
            .reset(self.image.display, self.config.default_crop_size)
    }

    /// Apply a pointer event. Returns `true` if the host should redraw.
    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                point,
                handle: Some(handle),
            } => self.engine.begin_resize(handle, point),
            PointerEvent::Down {
                point,
                handle: None,
            } => self.engine.begin_move(point),
            PointerEvent::Move { point } => self.engine.update(point),
            PointerEvent::Up => self.engine.end(),
            PointerEvent::Leave => self.engine.cancel(),
        }
    }

    /// Pointer-down for hosts that do not track handles themselves.
    ///
    /// Hit-tests `point` against the handles and the rect body. Presses
    /// outside the rect are ignored.
    pub fn press(&mut self, point: Point) -> bool {
        match self.hit_test(point) {
            Hit::Handle(handle) => self.dispatch(PointerEvent::Down {
                point,
                handle: Some(handle),
            }),
            Hit::Body => self.dispatch(PointerEvent::Down {
                point,
                handle: None,
            }),
            Hit::Outside => false,
        }
    }

    pub fn hit_test(&self, point: Point) -> Hit {
        crop::hit_test(&self.engine.rect(), point, self.config.grab_tolerance)
    }

    pub fn rect(&self) -> CropRect {
        self.engine.rect()
    }

    pub fn image(&self) -> &DisplayImage {
        &self.image
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn engine(&self) -> &CropEngine {
        &self.engine
    }

    pub fn scale_factors(&self) -> ScaleFactors {
        self.image.scale_factors()
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// Handle centres for drawing the overlay.
    pub fn handle_positions(&self) -> [(HandleId, Point); 8] {
        crop::handle_positions(&self.engine.rect())
    }

    /// Shaded strips around the crop for the preview overlay.
    pub fn shade_regions(&self) -> [Region; 4] {
        crop::shade_regions(&self.engine.rect(), self.image.display)
    }

    /// Rasterize the current rect from `source` and encode it.
    ///
    /// Commit is a read: it does not end a drag in progress.
    ///
    /// # Errors
    ///
    /// - `SourceNotReady` if the source has not finished decoding
    /// - `Encode` if the encoder rejects the cropped pixels
    pub fn commit<S: ImageSource + ?Sized>(&self, source: &S) -> Result<CropOutput, CropError> {
        let scale = self.source_scale(source);
        raster::extract(source, &self.engine.rect(), scale, self.config.output_format)
    }

    /// Scale factors against the source's actual size.
    ///
    /// These match [`Self::scale_factors`] unless the host hands over a
    /// different image than it loaded.
    fn source_scale<S: ImageSource + ?Sized>(&self, source: &S) -> ScaleFactors {
        let (width, height) = source.natural_size();
        if (width, height) != (self.image.natural_width, self.image.natural_height) {
            log::warn!(
                "source is {}x{} but tool was loaded with {}x{}",
                width,
                height,
                self.image.natural_width,
                self.image.natural_height
            );
        }
        ScaleFactors::new(
            width as f64 / self.image.display.width,
            height as f64 / self.image.display.height,
        )
    }
}
