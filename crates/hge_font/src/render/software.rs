//! CPU sprite renderer
//!
//! Rasterizes glyph quads into an RGBA canvas. Slow but dependency-light;
//! used by the preview tool and by pixel-level tests.

use image::{Rgba, RgbaImage};
use slotmap::{DefaultKey, SlotMap};

use super::{BlendMode, Color, GlyphDraw, SpriteRenderer, TextureHandle, TextureOptions};
use crate::assets::{AssetError, ImageData, ResourceLoader};
use crate::foundation::math::{QuadTransform, Vec2};

/// Software renderer drawing into an owned canvas
pub struct SoftwareRenderer<L: ResourceLoader> {
    loader: L,
    textures: SlotMap<DefaultKey, ImageData>,
    canvas: RgbaImage,
    depth: Vec<f32>,
}

impl<L: ResourceLoader> SoftwareRenderer<L> {
    /// Create a renderer with a transparent canvas of the given size
    pub fn new(width: u32, height: u32, loader: L) -> Self {
        Self {
            loader,
            textures: SlotMap::new(),
            canvas: RgbaImage::new(width, height),
            depth: vec![1.0; (width * height) as usize],
        }
    }

    /// Fill the canvas with a color and reset depth
    pub fn clear(&mut self, color: Color) {
        let fill = Rgba(color.to_rgba());
        for pixel in self.canvas.pixels_mut() {
            *pixel = fill;
        }
        self.depth.fill(1.0);
    }

    /// Register already-decoded pixels as a texture
    pub fn insert_texture(&mut self, image: ImageData) -> TextureHandle {
        TextureHandle::new(self.textures.insert(image))
    }

    /// Release a texture; handles to it become dangling and draw nothing
    pub fn free_texture(&mut self, handle: TextureHandle) -> bool {
        self.textures.remove(handle.key()).is_some()
    }

    /// The rendered canvas
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Write the canvas as a PNG file
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        self.canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| AssetError::WriteFailed(format!("{}: {e}", path.display())))?;
        log::info!("Saved {}x{} canvas to {:?}", self.canvas.width(), self.canvas.height(), path);
        Ok(())
    }

    fn sample(&self, draw: &GlyphDraw, local: Vec2) -> Option<[u8; 4]> {
        let Some(handle) = draw.texture else {
            return Some([255, 255, 255, 255]);
        };
        let texture = self.textures.get(handle.key())?;
        let tx = (draw.source.x + local.x).floor();
        let ty = (draw.source.y + local.y).floor();
        if tx < 0.0 || ty < 0.0 {
            return None;
        }
        texture.pixel(tx as u32, ty as u32)
    }

    fn bounds(&self, transform: &QuadTransform, width: f32, height: f32) -> Option<(u32, u32, u32, u32)> {
        let corners = [
            transform.apply(Vec2::new(0.0, 0.0)),
            transform.apply(Vec2::new(width, 0.0)),
            transform.apply(Vec2::new(width, height)),
            transform.apply(Vec2::new(0.0, height)),
        ];

        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max).ceil();
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max).ceil();

        let max_x = max_x.min(self.canvas.width() as f32);
        let max_y = max_y.min(self.canvas.height() as f32);
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some((min_x as u32, min_y as u32, max_x as u32, max_y as u32))
    }
}

fn modulate(texel: [u8; 4], color: Color, blend: BlendMode) -> [f32; 4] {
    let tint = color.to_rgba();
    let mut out = [0.0f32; 4];
    for channel in 0..3 {
        let t = f32::from(texel[channel]) / 255.0;
        let c = f32::from(tint[channel]) / 255.0;
        out[channel] = if blend.is_color_add() { (t + c).min(1.0) } else { t * c };
    }
    // Alpha always modulates
    out[3] = f32::from(texel[3]) / 255.0 * f32::from(tint[3]) / 255.0;
    out
}

fn composite(dst: &mut Rgba<u8>, src: [f32; 4], blend: BlendMode) {
    let alpha = src[3];
    for channel in 0..3 {
        let d = f32::from(dst.0[channel]) / 255.0;
        let v = if blend.is_alpha_blend() {
            src[channel] * alpha + d * (1.0 - alpha)
        } else {
            d + src[channel] * alpha
        };
        dst.0[channel] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let da = f32::from(dst.0[3]) / 255.0;
    let a = (alpha + da * (1.0 - alpha)).clamp(0.0, 1.0);
    dst.0[3] = (a * 255.0).round() as u8;
}

impl<L: ResourceLoader> SpriteRenderer for SoftwareRenderer<L> {
    fn load_texture(&mut self, path: &str, options: TextureOptions) -> Result<TextureHandle, AssetError> {
        let bytes = self.loader.load(path)?;
        let image = ImageData::from_bytes(&bytes)?;
        if image.width == 0 || image.height == 0 {
            return Err(AssetError::InvalidData(format!("{path}: empty image")));
        }
        if options.mipmap {
            log::debug!("Mipmaps requested for {}; software renderer samples the base level", path);
        }
        log::info!("Loaded texture {} ({}x{})", path, image.width, image.height);
        Ok(self.insert_texture(image))
    }

    fn draw_glyph(&mut self, draw: &GlyphDraw) {
        let width = draw.source.width;
        let height = draw.source.height;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        if let Some(handle) = draw.texture {
            if !self.textures.contains_key(handle.key()) {
                log::trace!("Skipping draw with released texture {:?}", handle);
                return;
            }
        }

        let transform = QuadTransform::new(
            Vec2::new(draw.x, draw.y),
            draw.rotation,
            Vec2::new(draw.scale_x, draw.scale_y),
        );
        let Some((x0, y0, x1, y1)) = self.bounds(&transform, width, height) else {
            return;
        };

        let canvas_width = self.canvas.width();
        for py in y0..y1 {
            for px in x0..x1 {
                let center = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let Some(local) = transform.invert(center) else {
                    return;
                };
                if local.x < 0.0 || local.y < 0.0 || local.x >= width || local.y >= height {
                    continue;
                }
                let Some(texel) = self.sample(draw, local) else {
                    continue;
                };

                let depth_idx = (py * canvas_width + px) as usize;
                if draw.blend.writes_z() {
                    if draw.z > self.depth[depth_idx] {
                        continue;
                    }
                    self.depth[depth_idx] = draw.z;
                }

                let src = modulate(texel, draw.color, draw.blend);
                composite(self.canvas.get_pixel_mut(px, py), src, draw.blend);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryResourceLoader;
    use crate::render::SourceRect;

    fn quad(texture: Option<TextureHandle>, x: f32, y: f32) -> GlyphDraw {
        GlyphDraw {
            texture,
            source: SourceRect::new(0.0, 0.0, 2.0, 2.0),
            x,
            y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            color: Color::WHITE,
            z: 0.5,
            blend: BlendMode::DEFAULT,
        }
    }

    #[test]
    fn test_untextured_quad_fills_pixels() {
        let mut renderer = SoftwareRenderer::new(4, 4, MemoryResourceLoader::new());
        renderer.clear(Color::BLACK);
        renderer.draw_glyph(&quad(None, 1.0, 1.0));

        let canvas = renderer.canvas();
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_multiply_tints_texels() {
        let mut renderer = SoftwareRenderer::new(2, 2, MemoryResourceLoader::new());
        let handle = renderer.insert_texture(ImageData::solid_color(2, 2, [255, 255, 255, 255]));
        renderer.clear(Color::BLACK);

        let mut draw = quad(Some(handle), 0.0, 0.0);
        draw.color = Color::from_argb(255, 255, 0, 0);
        renderer.draw_glyph(&draw);

        assert_eq!(renderer.canvas().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_color_add_with_additive_alpha() {
        let mut renderer = SoftwareRenderer::new(1, 1, MemoryResourceLoader::new());
        let handle = renderer.insert_texture(ImageData::solid_color(1, 1, [100, 0, 0, 255]));
        renderer.clear(Color::from_argb(255, 10, 10, 10));

        let mut draw = quad(Some(handle), 0.0, 0.0);
        draw.source = SourceRect::new(0.0, 0.0, 1.0, 1.0);
        draw.color = Color::from_argb(128, 50, 50, 50);
        draw.blend = BlendMode::COLOR_ADD;
        renderer.draw_glyph(&draw);

        // (100 + 50) * 128/255 + 10 and 50 * 128/255 + 10
        assert_eq!(renderer.canvas().get_pixel(0, 0).0, [85, 35, 35, 255]);
    }

    #[test]
    fn test_color_add_with_alpha_blend() {
        let mut renderer = SoftwareRenderer::new(1, 1, MemoryResourceLoader::new());
        let handle = renderer.insert_texture(ImageData::solid_color(1, 1, [100, 0, 0, 255]));
        renderer.clear(Color::from_argb(255, 10, 10, 10));

        let mut draw = quad(Some(handle), 0.0, 0.0);
        draw.source = SourceRect::new(0.0, 0.0, 1.0, 1.0);
        draw.color = Color::from_argb(255, 50, 50, 50);
        draw.blend = BlendMode::COLOR_ADD | BlendMode::ALPHA_BLEND;
        renderer.draw_glyph(&draw);

        assert_eq!(renderer.canvas().get_pixel(0, 0).0, [150, 50, 50, 255]);
    }

    #[test]
    fn test_color_multiply_with_additive_alpha() {
        let mut renderer = SoftwareRenderer::new(2, 2, MemoryResourceLoader::new());
        renderer.clear(Color::from_argb(255, 10, 10, 10));

        let mut draw = quad(None, 0.0, 0.0);
        draw.color = Color::from_argb(255, 100, 0, 0);
        draw.blend = BlendMode::empty();
        renderer.draw_glyph(&draw);

        assert_eq!(renderer.canvas().get_pixel(1, 1).0, [110, 10, 10, 255]);
    }

    #[test]
    fn test_horizontal_scale_widens_quad() {
        let mut renderer = SoftwareRenderer::new(6, 4, MemoryResourceLoader::new());
        renderer.clear(Color::BLACK);

        let mut draw = quad(None, 0.0, 0.0);
        draw.scale_x = 2.0;
        renderer.draw_glyph(&draw);

        let canvas = renderer.canvas();
        let lit: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == [255, 255, 255, 255])
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(lit.len(), 8);
        assert_eq!(canvas.get_pixel(3, 1).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(4, 1).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_rotation_pivots_on_top_left_corner() {
        let mut renderer = SoftwareRenderer::new(8, 8, MemoryResourceLoader::new());
        renderer.clear(Color::BLACK);

        // A quarter turn sends the quad's width down and its height left
        let mut draw = quad(None, 4.0, 4.0);
        draw.rotation = std::f32::consts::FRAC_PI_2;
        renderer.draw_glyph(&draw);

        let canvas = renderer.canvas();
        for (x, y) in [(2, 4), (3, 4), (2, 5), (3, 5)] {
            assert_eq!(canvas.get_pixel(x, y).0, [255, 255, 255, 255], "pixel ({x}, {y})");
        }
        for (x, y) in [(4, 4), (4, 5), (2, 3), (3, 6), (1, 4)] {
            assert_eq!(canvas.get_pixel(x, y).0, [0, 0, 0, 255], "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_depth_write_rejects_farther_quads() {
        let mut renderer = SoftwareRenderer::new(2, 2, MemoryResourceLoader::new());
        renderer.clear(Color::BLACK);

        let mut near = quad(None, 0.0, 0.0);
        near.blend = BlendMode::ALPHA_BLEND | BlendMode::Z_WRITE;
        near.z = 0.2;
        near.color = Color::from_argb(255, 0, 255, 0);
        renderer.draw_glyph(&near);

        let mut far = near;
        far.z = 0.8;
        far.color = Color::from_argb(255, 0, 0, 255);
        renderer.draw_glyph(&far);

        assert_eq!(renderer.canvas().get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_load_missing_texture_fails() {
        let mut renderer = SoftwareRenderer::new(2, 2, MemoryResourceLoader::new());
        let result = renderer.load_texture("nope.png", TextureOptions::default());
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_released_texture_draws_nothing() {
        let mut renderer = SoftwareRenderer::new(2, 2, MemoryResourceLoader::new());
        let handle = renderer.insert_texture(ImageData::solid_color(2, 2, [255, 255, 255, 255]));
        assert!(renderer.free_texture(handle));

        renderer.draw_glyph(&quad(Some(handle), 0.0, 0.0));
        assert_eq!(renderer.canvas().get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
