//! Cropkit WASM - WebAssembly bindings for the crop tool
//!
//! This crate exposes the cropkit-core crop tool to the upload page.
//!
//! # Module Structure
//!
//! - `tool` - `JsCropTool`: pointer events in, rect and encoded crop out
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG/PNG, header probing)
//! - `encode` - Image encoding bindings (JPEG/PNG export)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropTool } from '@cropkit/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const tool = JsCropTool.from_image(image, { maxDisplayBox: { width: 500, height: 350 } });
//! tool.set_render_callback((rect) => drawOverlay(rect));
//!
//! surface.onpointerdown = (e) => tool.press(e.offsetX, e.offsetY);
//! surface.onpointermove = (e) => tool.pointer_move(e.offsetX, e.offsetY);
//! surface.onpointerup = () => tool.pointer_up();
//! surface.onpointerleave = () => tool.pointer_leave();
//!
//! const dataUrl = tool.commit_data_url();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod tool;
mod types;

// Re-export public types
pub use decode::{decode_image, probe_dimensions};
pub use encode::{encode_jpeg_from_image, encode_png_from_image};
pub use tool::JsCropTool;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Ignore the error if a logger is already installed.
    _ = console_log::init_with_level(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
