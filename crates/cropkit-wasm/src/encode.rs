//! Image encoding WASM bindings.
//!
//! Most pages only need [`crate::JsCropTool::commit`], which encodes with the
//! configured output format. These functions encode an arbitrary image, e.g.
//! a preview the page wants to cache.
//!
//! # Functions
//!
//! - [`encode_jpeg_from_image`] - Encode a JsDecodedImage to JPEG bytes
//! - [`encode_png_from_image`] - Encode a JsDecodedImage to PNG bytes

use crate::types::JsDecodedImage;
use cropkit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsDecodedImage to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The decoded image to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality, recommended: 90)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg(&pixels, image.width(), image.height(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to PNG bytes (lossless).
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png(&pixels, image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Note: Most encode tests use functions that return `Result<T, JsValue>`, which
/// only work on wasm32 targets. For comprehensive encode testing, see the tests
/// in `cropkit_core::encode` which test the underlying functionality.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_pixels_encode_as_jpeg() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 3]);

        let pixels = img.pixels();
        let jpeg = encode::encode_jpeg(&pixels, img.width(), img.height(), 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_image() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg_from_image(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsDecodedImage::new(8, 8, vec![200u8; 8 * 8 * 3]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_rejects_short_buffer() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 100]);
        assert!(encode_jpeg_from_image(&img, 90).is_err());
    }
}
