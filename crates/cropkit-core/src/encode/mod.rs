//! Encoding committed crops for transport.
//!
//! This module provides functionality for:
//! - Encoding RGB pixels to JPEG (configurable quality) or PNG
//! - Rendering encoded bytes as a self-contained `data:` URL
//!
//! All operations are synchronous and run once per commit, never per
//! pointer-move.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::{encode, to_data_url, OutputFormat};
//!
//! let bytes = encode(&cropped, OutputFormat::Jpeg { quality: 90 })?;
//! let url = to_data_url(&bytes, OutputFormat::Jpeg { quality: 90 });
//! ```

mod data_url;
mod jpeg;
mod png;
mod types;

pub use data_url::to_data_url;
pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};

use crate::decode::DecodedImage;

/// Encode a decoded image in the requested format.
pub fn encode(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg { quality } => {
            encode_jpeg(&image.pixels, image.width, image.height, quality)
        }
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
    }
}
