//! Decoding uploaded image bytes with EXIF orientation handling.
//!
//! The crop tool works on the image as the user sees it, so orientation is
//! applied at decode time and the natural size reported by
//! [`probe_dimensions`] is the oriented size.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode JPEG or PNG bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Read the oriented (width, height) from the image header without decoding pixels.
///
/// Lets the host size the viewport before the full decode finishes.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let reader = guessed_reader(bytes)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    Ok(extract_orientation(bytes).oriented(width, height))
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    guessed_reader(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    /// 3x2 image: red, green, blue / white, black, gray.
    fn sample_pixels() -> Vec<u8> {
        vec![
            255, 0, 0, 0, 255, 0, 0, 0, 255, //
            255, 255, 255, 0, 0, 0, 128, 128, 128,
        ]
    }

    #[test]
    fn test_decode_png_exact_pixels() {
        let png = encode_png(&sample_pixels(), 3, 2).unwrap();
        let img = decode_image(&png).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels, sample_pixels());
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let pixels = vec![128u8; 40 * 30 * 3];
        let jpeg = encode_jpeg(&pixels, 40, 30, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (40, 30));
        assert_eq!(img.pixels.len(), 40 * 30 * 3);
    }

    #[test]
    fn test_probe_dimensions() {
        let png = encode_png(&vec![0u8; 20 * 10 * 3], 20, 10).unwrap();
        assert_eq!(probe_dimensions(&png).unwrap(), (20, 10));
    }

    #[test]
    fn test_decode_invalid_data() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&sample_pixels(), 3, 2).unwrap();
        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_defaults_to_normal() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
        let png = encode_png(&sample_pixels(), 3, 2).unwrap();
        assert_eq!(extract_orientation(&png), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);
        let rgb_result = result.into_rgb8();
        assert_eq!(rgb_result.dimensions(), (1, 2));
        // Left pixel ends up on top after a clockwise turn
        assert_eq!(rgb_result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal);
        let rgb_result = result.into_rgb8();
        assert_eq!(rgb_result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb_result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
