//! GPU-side mesh construction.
//!
//! A [`Mesh`] is one vertex array handle plus its index count, built once
//! from position, index and UV arrays and immutable afterwards. The GPU
//! objects behind it belong to the context registry, not to the mesh itself.

use crate::abs::buffer::{encode_f32, encode_u32};
use crate::abs::context::GraphicsContext;

use glow::HasContext;

/// Attribute slot carrying vertex positions, three floats per vertex.
pub const ATTR_POSITION: u32 = 0;
/// Attribute slot carrying texture coordinates, two floats per vertex.
pub const ATTR_UV: u32 = 1;

/// A drawable triangle-list mesh stored on the GPU.
pub struct Mesh {
    vao: glow::VertexArray,
    index_count: i32,
    attributes: Vec<u32>,
}

impl Mesh {
    /// Uploads the geometry and records its layout under a fresh vertex
    /// array. Positions fill slot 0; UVs, when supplied, fill slot 1.
    ///
    /// Index values must all be below `positions.len() / 3`; an out-of-range
    /// index is a caller error that surfaces at draw time, not here.
    pub fn build(
        ctx: &GraphicsContext,
        positions: &[f32],
        indices: &[u32],
        uvs: Option<&[f32]>,
    ) -> Self {
        let vao = ctx.alloc_vertex_array();
        ctx.bind_vertex_array(Some(vao));
        upload_indices(ctx, indices);
        store_attribute(ctx, ATTR_POSITION, 3, positions);
        let mut attributes = vec![ATTR_POSITION];
        if let Some(uvs) = uvs {
            store_attribute(ctx, ATTR_UV, 2, uvs);
            attributes.push(ATTR_UV);
        }
        ctx.unbind_vertex_array();

        Self {
            vao,
            index_count: indices.len() as i32,
            attributes,
        }
    }

    pub fn vao(&self) -> glow::VertexArray {
        self.vao
    }

    /// The draw count: number of indices, not number of vertices.
    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// The attribute slots this mesh populates; a draw call enables exactly
    /// these.
    pub fn attributes(&self) -> &[u32] {
        &self.attributes
    }
}

fn upload_indices(ctx: &GraphicsContext, indices: &[u32]) {
    let vbo = ctx.alloc_buffer();
    ctx.bind_element_buffer(Some(vbo));
    unsafe {
        ctx.gl().buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            &encode_u32(indices),
            glow::STATIC_DRAW,
        );
    }
    // The element buffer stays bound; it is recorded into the vertex array
    // and released with it.
}

fn store_attribute(ctx: &GraphicsContext, slot: u32, components: i32, data: &[f32]) {
    let vbo = ctx.alloc_buffer();
    ctx.bind_array_buffer(Some(vbo));
    unsafe {
        ctx.gl()
            .buffer_data_u8_slice(glow::ARRAY_BUFFER, &encode_f32(data), glow::STATIC_DRAW);
        ctx.gl()
            .vertex_attrib_pointer_f32(slot, components, glow::FLOAT, false, 0, 0);
    }
    ctx.unbind_array_buffer();
}
