//! Crop tool WASM bindings.
//!
//! `JsCropTool` wraps a [`CropTool`] together with the decoded original it
//! rasterizes from. The page forwards pointer events in display coordinates;
//! whenever the crop rect changes, the registered render callback receives an
//! [`OverlaySnapshot`] to draw.
//!
//! # Example
//!
//! ```typescript
//! const tool = new JsCropTool(width, height, { outputFormat: { type: 'png' } });
//! tool.set_render_callback(({ rect, handles, shade }) => draw(rect, handles, shade));
//!
//! handleEl.onpointerdown = (e) => tool.pointer_down(e.offsetX, e.offsetY, 'se');
//! tool.pointer_move(x, y);
//! tool.pointer_up();
//!
//! tool.set_image(decode_image(bytes));
//! img.src = tool.commit_data_url();
//! ```

use cropkit_core::crop::{HandleId, ParseHandleError, Region};
use cropkit_core::decode::{self, DecodedImage, SourceImage};
use cropkit_core::{CropConfig, CropError, CropOutput, CropRect, CropTool, PointerEvent};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, JsDecodedImage};

/// A handle centre, for drawing the grab squares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleMarker {
    pub handle: HandleId,
    pub x: f64,
    pub y: f64,
}

/// Everything the page needs to draw the crop overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySnapshot {
    pub rect: CropRect,
    pub handles: Vec<HandleMarker>,
    /// Shaded strips outside the crop: top, bottom, left, right.
    pub shade: [Region; 4],
    pub dragging: bool,
}

/// Crop tool handle for JavaScript.
#[wasm_bindgen]
pub struct JsCropTool {
    tool: CropTool,
    /// Full-resolution original, once decoding has finished.
    source: Option<DecodedImage>,
    render: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl JsCropTool {
    /// Create a tool for an image whose pixels are not decoded yet.
    ///
    /// `config` is a partial `CropConfig` object (camelCase keys); missing
    /// fields take their defaults. Pass `undefined` for all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(natural_width: u32, natural_height: u32, config: JsValue) -> Result<JsCropTool, JsValue> {
        let config = parse_config(config)?;
        Self::from_parts(config, natural_width, natural_height).map_err(to_js_error)
    }

    /// Create a tool for an already decoded image.
    pub fn from_image(image: &JsDecodedImage, config: JsValue) -> Result<JsCropTool, JsValue> {
        let config = parse_config(config)?;
        let mut tool =
            Self::from_parts(config, image.width(), image.height()).map_err(to_js_error)?;
        tool.attach(image.to_decoded()).map_err(to_js_error)?;
        Ok(tool)
    }

    /// Hand over the decoded original.
    ///
    /// If its size differs from the one the tool was created with, the
    /// viewport is refitted and the crop recentered.
    pub fn set_image(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        if self.attach(image.to_decoded()).map_err(to_js_error)? {
            self.notify();
        }
        Ok(())
    }

    /// Register a function called with an `OverlaySnapshot` after every change.
    pub fn set_render_callback(&mut self, callback: js_sys::Function) {
        self.render = Some(callback);
        self.notify();
    }

    /// Pointer pressed on a handle (`"nw"`, `"se"`, ...) or, with no handle,
    /// on the crop body.
    pub fn pointer_down(&mut self, x: f64, y: f64, handle: Option<String>) -> Result<bool, JsValue> {
        let handle = parse_handle(handle.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let point = cropkit_core::Point::new(x, y);
        Ok(self.apply(PointerEvent::Down { point, handle }))
    }

    /// Pointer pressed anywhere; the tool works out what was grabbed.
    pub fn press(&mut self, x: f64, y: f64) -> bool {
        let changed = self.tool.press(cropkit_core::Point::new(x, y));
        if changed {
            self.notify();
        }
        changed
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let point = cropkit_core::Point::new(x, y);
        self.apply(PointerEvent::Move { point })
    }

    pub fn pointer_up(&mut self) -> bool {
        self.apply(PointerEvent::Up)
    }

    /// Pointer left the surface: the drag in progress is reverted.
    pub fn pointer_leave(&mut self) -> bool {
        self.apply(PointerEvent::Leave)
    }

    /// Recenter the default crop.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.tool.reset().map_err(to_js_error)?;
        self.notify();
        Ok(())
    }

    /// Displayed image width in CSS pixels.
    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> f64 {
        self.tool.image().display.width
    }

    /// Displayed image height in CSS pixels.
    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> f64 {
        self.tool.image().display.height
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.tool.is_dragging()
    }

    /// The current crop rect as `{ x, y, width, height, aspectRatio }`.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.tool.rect()).map_err(JsValue::from)
    }

    /// The current overlay as an `OverlaySnapshot` object.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.snapshot()).map_err(JsValue::from)
    }

    /// Downscaled preview at the display size.
    ///
    /// `filter`: 0=Nearest, 1=Bilinear (default), 2=Lanczos3.
    pub fn preview(&self, filter: u8) -> Result<JsDecodedImage, JsValue> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| to_js_error(CropError::SourceNotReady))?;
        decode::render_display_image(source, self.tool.image(), filter_from_u8(filter))
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rasterize the crop from the original and return the encoded bytes.
    pub fn commit(&self) -> Result<Vec<u8>, JsValue> {
        self.commit_output()
            .map(|output| output.bytes)
            .map_err(to_js_error)
    }

    /// Like [`Self::commit`], as a `data:` URL.
    pub fn commit_data_url(&self) -> Result<String, JsValue> {
        self.commit_output()
            .map(|output| output.to_data_url())
            .map_err(to_js_error)
    }

    /// MIME type of the committed output.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.tool.config().output_format.mime_type().to_string()
    }
}

impl JsCropTool {
    fn from_parts(config: CropConfig, natural_width: u32, natural_height: u32) -> Result<Self, CropError> {
        let tool = CropTool::new(config, natural_width, natural_height)?;
        Ok(Self {
            tool,
            source: None,
            render: None,
        })
    }

    /// Store the original. Returns `true` if the viewport had to be refitted.
    fn attach(&mut self, image: DecodedImage) -> Result<bool, CropError> {
        if !image.has_valid_buffer() {
            return Err(CropError::InvalidImage {
                width: image.width as f64,
                height: image.height as f64,
            });
        }
        let loaded = self.tool.image();
        let resized = (image.width, image.height) != (loaded.natural_width, loaded.natural_height);
        if resized {
            self.tool.load(image.width, image.height)?;
        }
        self.source = Some(image);
        Ok(resized)
    }

    fn apply(&mut self, event: PointerEvent) -> bool {
        let changed = self.tool.dispatch(event);
        if changed {
            self.notify();
        }
        changed
    }

    fn commit_output(&self) -> Result<CropOutput, CropError> {
        match &self.source {
            Some(image) => self.tool.commit(image),
            None => {
                let image = self.tool.image();
                self.tool.commit(&SourceImage::Decoding {
                    width: image.natural_width,
                    height: image.natural_height,
                })
            }
        }
    }

    fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            rect: self.tool.rect(),
            handles: self
                .tool
                .handle_positions()
                .iter()
                .map(|&(handle, point)| HandleMarker {
                    handle,
                    x: point.x,
                    y: point.y,
                })
                .collect(),
            shade: self.tool.shade_regions(),
            dragging: self.tool.is_dragging(),
        }
    }

    fn notify(&self) {
        let Some(callback) = &self.render else {
            return;
        };
        let snapshot = match serde_wasm_bindgen::to_value(&self.snapshot()) {
            Ok(value) => value,
            Err(e) => {
                log::error!("failed to serialize overlay: {}", e);
                return;
            }
        };
        // Hand the thrown value to the console as-is so devtools keep its stack.
        if let Err(e) = callback.call1(&JsValue::NULL, &snapshot) {
            web_sys::console::warn_2(&JsValue::from_str("render callback threw:"), &e);
        }
    }
}

fn parse_config(config: JsValue) -> Result<CropConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(JsValue::from)
}

fn parse_handle(handle: Option<&str>) -> Result<Option<HandleId>, ParseHandleError> {
    handle.map(str::parse).transpose()
}

fn to_js_error(error: CropError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Tests for the crop tool bindings.
///
/// Only paths that never construct a `JsValue` run natively; the rest is
/// covered by `wasm_tests`.
#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::Point;

    fn tool() -> JsCropTool {
        JsCropTool::from_parts(CropConfig::default(), 2000, 1400).unwrap()
    }

    fn gray(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![60u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_parse_handle() {
        assert_eq!(parse_handle(None), Ok(None));
        assert_eq!(parse_handle(Some("se")), Ok(Some(HandleId::SE)));
        assert_eq!(parse_handle(Some("NW")), Ok(Some(HandleId::NW)));
        assert!(parse_handle(Some("middle")).is_err());
    }

    #[test]
    fn test_commit_before_image_attached() {
        let tool = tool();
        assert!(matches!(tool.commit_output(), Err(CropError::SourceNotReady)));
    }

    #[test]
    fn test_drag_then_commit() {
        let mut tool = tool();
        assert!(tool.apply(PointerEvent::Down {
            point: Point::new(350.0, 250.0),
            handle: Some(HandleId::SE),
        }));
        assert!(tool.apply(PointerEvent::Move {
            point: Point::new(390.0, 290.0),
        }));
        assert!(tool.apply(PointerEvent::Up));

        assert!(!tool.attach(gray(2000, 1400)).unwrap());
        let output = tool.commit_output().unwrap();
        assert_eq!((output.width, output.height), (960, 720));
    }

    #[test]
    fn test_short_pixel_buffer_is_an_error() {
        let mut tool = tool();
        let js_image = JsDecodedImage::new(2000, 1400, vec![0u8; 100]);
        assert!(matches!(
            tool.attach(js_image.to_decoded()),
            Err(CropError::InvalidImage { .. })
        ));

        // A buffer that slips past attach still fails cleanly at commit
        tool.source = Some(js_image.to_decoded());
        assert!(matches!(tool.commit_output(), Err(CropError::InvalidImage { .. })));
    }

    #[test]
    fn test_attach_different_size_refits() {
        let mut tool = tool();
        assert!(tool.attach(gray(700, 700)).unwrap());
        assert_eq!(tool.display_width(), 350.0);
        assert_eq!(tool.display_height(), 350.0);
    }

    #[test]
    fn test_snapshot_contents() {
        let tool = tool();
        let snapshot = tool.snapshot();
        assert_eq!(snapshot.handles.len(), 8);
        assert_eq!(snapshot.rect, tool.tool.rect());
        assert!(!snapshot.dragging);
        // Top strip spans the full width above the crop
        assert_eq!(snapshot.shade[0].width, 500.0);
        assert_eq!(snapshot.shade[0].height, 100.0);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut tool = tool();
        assert!(!tool.press(1.0, 1.0));
        assert!(tool.press(250.0, 175.0));
        assert!(tool.is_dragging());
    }
}
