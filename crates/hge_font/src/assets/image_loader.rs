//! Image decoding for font atlases
//!
//! Decodes PNG bytes (as delivered by a resource loader) into RGBA8 pixels.

use crate::assets::AssetError;

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode image: {e}")))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Decoded image {}x{}", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self { data, width, height }
    }

    /// RGBA value at a pixel, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.data
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_pixels() {
        let img = ImageData::solid_color(2, 3, [1, 2, 3, 4]);
        assert_eq!(img.data.len(), 2 * 3 * 4);
        assert_eq!(img.pixel(1, 2), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut png = Vec::new();
        let src = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 40]));
        image::DynamicImage::ImageRgba8(src)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let img = ImageData::from_bytes(&png).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.pixel(3, 1), Some([10, 20, 30, 40]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(ImageData::from_bytes(b"not a png"), Err(AssetError::LoadFailed(_))));
    }
}
