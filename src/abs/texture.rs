//! GPU texture construction from packed RGBA pixels or a decoded image.
//!
//! The packed form is one `u32` per pixel, row-major, with red in bits 16-23,
//! green in 8-15, blue in 0-7 and alpha in 24-31. Upload order is always
//! R,G,B,A bytes.

use std::rc::Rc;

use glow::HasContext;
use image::DynamicImage;

use crate::abs::context::GraphicsContext;

/// Sampling filter, chosen at creation. Nearest is the default; the textures
/// this renderer ships are pixel art.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    Nearest,
    Linear,
}

impl Filter {
    fn gl_enum(self) -> i32 {
        match self {
            Filter::Nearest => glow::NEAREST as i32,
            Filter::Linear => glow::LINEAR as i32,
        }
    }
}

/// Packs four channel bytes into one pixel value.
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Unpacks packed pixels into the R,G,B,A byte stream the driver consumes.
pub fn unpack_pixels(pixels: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * 4);
    for &pixel in pixels {
        bytes.push((pixel >> 16) as u8);
        bytes.push((pixel >> 8) as u8);
        bytes.push(pixel as u8);
        bytes.push((pixel >> 24) as u8);
    }
    bytes
}

/// A 2-D RGBA8 image resource. Immutable after construction; the handle is
/// owned by the context registry and released with everything else at
/// shutdown.
pub struct Texture {
    ctx: Rc<GraphicsContext>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Builds a texture from packed RGBA pixels. The pixel count must match
    /// `width * height`.
    pub fn create(
        ctx: &Rc<GraphicsContext>,
        width: u32,
        height: u32,
        pixels: &[u32],
        filter: Filter,
    ) -> Self {
        assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "pixel buffer length must equal width * height"
        );
        Self::upload(ctx, width, height, &unpack_pixels(pixels), filter)
    }

    /// Builds a texture from a decoded image, converting to RGBA8.
    pub fn from_image(ctx: &Rc<GraphicsContext>, image: &DynamicImage, filter: Filter) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::upload(ctx, width, height, rgba.as_raw(), filter)
    }

    fn upload(
        ctx: &Rc<GraphicsContext>,
        width: u32,
        height: u32,
        bytes: &[u8],
        filter: Filter,
    ) -> Self {
        let id = ctx.alloc_texture();
        ctx.bind_texture(Some(id));
        unsafe {
            let gl = ctx.gl();
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter.gl_enum());
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter.gl_enum());
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(bytes)),
            );
        }
        ctx.unbind_texture();

        Self {
            ctx: Rc::clone(ctx),
            id,
            width,
            height,
        }
    }

    /// Binds the texture to the given texture unit.
    pub fn bind_to_unit(&self, unit: u32) {
        self.ctx.active_texture_unit(unit);
        self.ctx.bind_texture(Some(self.id));
    }

    /// Clears the texture binding on the current unit.
    pub fn unbind(&self) {
        self.ctx.unbind_texture();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bytes_upload_in_rgba_order() {
        // A=0xAA, R=0xBB, G=0xCC, B=0xDD under the packed layout.
        let bytes = unpack_pixels(&[0xAABBCCDD]);
        assert_eq!(bytes, vec![0xBB, 0xCC, 0xDD, 0xAA]);
    }

    #[test]
    fn pack_and_unpack_agree() {
        let pixel = pack_rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(pixel, 0x7812_3456);
        assert_eq!(unpack_pixels(&[pixel]), vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn unpack_is_row_major_per_pixel() {
        let pixels = [pack_rgba(1, 2, 3, 4), pack_rgba(5, 6, 7, 8)];
        assert_eq!(unpack_pixels(&pixels), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
