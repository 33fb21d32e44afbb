//! Image decoding WASM bindings.
//!
//! This module exposes the cropkit-core decoding functions to JavaScript.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG from bytes, EXIF orientation applied
//! - [`probe_dimensions`] - Read the oriented size from the header without decoding
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, probe_dimensions, JsCropTool } from '@cropkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//!
//! // Start the tool as soon as the size is known...
//! const [width, height] = probe_dimensions(bytes);
//! const tool = new JsCropTool(width, height, config);
//!
//! // ...and hand over the pixels once decoding finishes.
//! tool.set_image(decode_image(bytes));
//! ```

use crate::types::JsDecodedImage;
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a supported image format
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the upright `[width, height]` of an image from its header.
///
/// Much cheaper than a full decode; use it to size the crop tool while the
/// pixels are still being decoded.
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::probe_dimensions(bytes)
        .map(|(width, height)| vec![width, height])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
