//! Image decoding for the crop tool.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG/PNG bytes with EXIF orientation applied
//! - Reading natural dimensions from the header before a full decode
//! - Rendering the down-scaled preview shown under the crop overlay
//! - The [`ImageSource`] contract the rasterizer reads pixels through
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::{decode_image, DecodedImage};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod resize;
mod source;
mod types;

pub use resize::{render_display_image, resize};
pub use source::{decode_image, probe_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, ImageSource, Orientation, SourceImage};
