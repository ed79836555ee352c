//! Demo scene data: a rectangular room (floor plus four walls) and a
//! procedural 16x16 test texture.

use glam::Vec3;

use crate::abs::texture::pack_rgba;

/// Floor and four walls, 4 vertices each, 3 floats per vertex.
pub const ROOM_POSITIONS: [f32; 60] = [
    // Ground
    -6.0, 4.0, 0.0, // v0: top left
    6.0, 4.0, 0.0, // v1: top right
    6.0, -4.0, 0.0, // v2: bottom right
    -6.0, -4.0, 0.0, // v3: bottom left
    // Top wall
    -6.0, 4.0, 3.0, //
    6.0, 4.0, 3.0, //
    6.0, 4.0, 0.0, //
    -6.0, 4.0, 0.0, //
    // Right wall
    6.0, 4.0, 3.0, //
    6.0, -4.0, 3.0, //
    6.0, -4.0, 0.0, //
    6.0, 4.0, 0.0, //
    // Bottom wall
    6.0, -4.0, 3.0, //
    -6.0, -4.0, 3.0, //
    -6.0, -4.0, 0.0, //
    6.0, -4.0, 0.0, //
    // Left wall
    -6.0, -4.0, 3.0, //
    -6.0, 4.0, 3.0, //
    -6.0, 4.0, 0.0, //
    -6.0, -4.0, 0.0,
];

/// Two triangles per quad, five quads.
pub const ROOM_INDICES: [u32; 30] = [
    0, 3, 1, 1, 3, 2, // ground
    4, 7, 5, 5, 7, 6, // top wall
    8, 11, 9, 9, 11, 10, // right wall
    12, 15, 13, 13, 15, 14, // bottom wall
    16, 19, 17, 17, 19, 18, // left wall
];

/// Tiling texture coordinates, 2 floats per vertex, same order as the
/// positions. Values above 1.0 repeat the texture across the surface.
pub const ROOM_UVS: [f32; 40] = [
    // Ground
    0.0, 0.0, 12.0, 0.0, 12.0, 8.0, 0.0, 8.0, //
    // Top wall
    0.0, 0.0, 6.0, 0.0, 6.0, 3.0, 0.0, 3.0, //
    // Right wall
    0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 0.0, 3.0, //
    // Bottom wall
    0.0, 0.0, 6.0, 0.0, 6.0, 3.0, 0.0, 3.0, //
    // Left wall
    0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 0.0, 3.0,
];

/// Where the five room copies sit relative to the shared movement offset.
pub const ROOM_OFFSETS: [Vec3; 5] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-13.0, 0.0, 0.0),
    Vec3::new(13.0, 0.0, 0.0),
    Vec3::new(0.0, -10.0, 0.0),
    Vec3::new(0.0, 10.0, 0.0),
];

/// Pushes the scene in front of the camera at startup.
pub const VIEW_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -25.0);

pub const TEST_TEXTURE_SIZE: u32 = 16;

/// A turquoise tile with a light top-left border and a dark bottom-right
/// border, corners left at the base color.
pub fn test_pixels() -> Vec<u32> {
    let light = pack_rgba(72, 216, 255, 0xFF);
    let base = pack_rgba(48, 144, 192, 0xFF);
    let dark = pack_rgba(0x20, 0x60, 0x80, 0xFF);

    let size = TEST_TEXTURE_SIZE as usize;
    let len = size * size;
    let mut pixels = vec![base; len];
    for i in 0..size {
        pixels[i * size] = light;
        pixels[i] = light;
        pixels[(size - 1) * size + i] = dark;
        pixels[(size - 1) + size * i] = dark;
    }
    pixels[0] = base;
    pixels[len - 1] = base;
    pixels[size - 1] = base;
    pixels[len - size] = base;
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_in_vertex_range() {
        let vertex_count = (ROOM_POSITIONS.len() / 3) as u32;
        assert!(ROOM_INDICES.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn uvs_cover_every_vertex() {
        assert_eq!(ROOM_UVS.len() / 2, ROOM_POSITIONS.len() / 3);
    }

    #[test]
    fn index_count_is_two_triangles_per_quad() {
        assert_eq!(ROOM_INDICES.len(), 5 * 6);
    }

    #[test]
    fn test_texture_fills_its_dimensions() {
        let pixels = test_pixels();
        assert_eq!(
            pixels.len(),
            (TEST_TEXTURE_SIZE * TEST_TEXTURE_SIZE) as usize
        );
    }
}
