//! Raster image decoding.

use kerf_pipeline::RgbaImage;

use crate::LoadError;

/// Decode raster image bytes into an RGBA pixel grid.
///
/// The container format is sniffed from the byte content, so a
/// mislabelled extension still decodes as long as the contents are a
/// supported format.
///
/// # Errors
///
/// Returns [`LoadError::ImageDecode`] if the bytes are not a
/// decodable image, and [`LoadError::InvalidDimensions`] if the
/// decoded image is zero-sized.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::InvalidDimensions);
    }
    Ok(image)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{ImageEncoder, Rgba};

    use super::*;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
        encoder
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_round_trip() {
        let original = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let decoded = decode(&png_bytes(&original)).unwrap();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = decode(b"not an image at all");
        assert!(matches!(result, Err(LoadError::ImageDecode(_))));
    }
}
