//! Ownership and tracking of driver-side objects.
//!
//! [`GraphicsContext`] wraps the raw [`glow::Context`] together with the
//! registry of every vertex array, buffer and texture handle allocated during
//! the run. All rendering happens on the one thread that owns the GL context,
//! which is why the context is shared through `Rc` and uses plain interior
//! mutability instead of locks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glow::HasContext;

/// Owns the GL context and tracks every GPU object allocated through it.
///
/// Handles are freed in one sweep by [`GraphicsContext::free_all`], which must
/// run after the last draw call and before the windowing layer tears the GL
/// context down. Allocating after `free_all` is a caller error and is not
/// guarded against.
pub struct GraphicsContext {
    gl: glow::Context,
    vertex_arrays: RefCell<Vec<glow::VertexArray>>,
    buffers: RefCell<Vec<glow::Buffer>>,
    textures: RefCell<Vec<glow::Texture>>,
    freed: Cell<bool>,
}

impl GraphicsContext {
    pub fn new(gl: glow::Context) -> Rc<Self> {
        Rc::new(Self {
            gl,
            vertex_arrays: RefCell::new(Vec::new()),
            buffers: RefCell::new(Vec::new()),
            textures: RefCell::new(Vec::new()),
            freed: Cell::new(false),
        })
    }

    /// Raw access for the few call sites (frame driver setup) that need GL
    /// state the wrappers below do not cover.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    // Allocation. A driver that fails to hand out a handle has lost its
    // context, so these abort rather than propagate.

    pub fn alloc_vertex_array(&self) -> glow::VertexArray {
        let vao = unsafe { self.gl.create_vertex_array() }
            .unwrap_or_else(|reason| panic!("vertex array allocation failed: {reason}"));
        self.vertex_arrays.borrow_mut().push(vao);
        vao
    }

    pub fn alloc_buffer(&self) -> glow::Buffer {
        let vbo = unsafe { self.gl.create_buffer() }
            .unwrap_or_else(|reason| panic!("buffer allocation failed: {reason}"));
        self.buffers.borrow_mut().push(vbo);
        vbo
    }

    pub fn alloc_texture(&self) -> glow::Texture {
        let texture = unsafe { self.gl.create_texture() }
            .unwrap_or_else(|reason| panic!("texture allocation failed: {reason}"));
        self.textures.borrow_mut().push(texture);
        texture
    }

    /// Releases every tracked handle exactly once.
    pub fn free_all(&self) {
        if self.freed.replace(true) {
            return;
        }
        let vertex_arrays: Vec<_> = self.vertex_arrays.borrow_mut().drain(..).collect();
        let buffers: Vec<_> = self.buffers.borrow_mut().drain(..).collect();
        let textures: Vec<_> = self.textures.borrow_mut().drain(..).collect();
        unsafe {
            for &vao in &vertex_arrays {
                self.gl.delete_vertex_array(vao);
            }
            for &vbo in &buffers {
                self.gl.delete_buffer(vbo);
            }
            for &texture in &textures {
                self.gl.delete_texture(texture);
            }
        }
        log::info!(
            "released {} vertex arrays, {} buffers, {} textures",
            vertex_arrays.len(),
            buffers.len(),
            textures.len()
        );
    }

    // Binding. These are stateless wrappers; unbinding is binding the null
    // handle, which glow spells `None`.

    pub fn bind_vertex_array(&self, vao: Option<glow::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(vao) }
    }

    pub fn unbind_vertex_array(&self) {
        self.bind_vertex_array(None);
    }

    pub fn bind_array_buffer(&self, vbo: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, vbo) }
    }

    pub fn unbind_array_buffer(&self) {
        self.bind_array_buffer(None);
    }

    /// Binds the index buffer of the currently bound vertex array.
    ///
    /// There is deliberately no matching unbind: unbinding an element buffer
    /// while its vertex array is still bound detaches the index association
    /// from that vertex array on some drivers. The binding is released along
    /// with the vertex array itself.
    pub fn bind_element_buffer(&self, vbo: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, vbo) }
    }

    pub fn enable_attribute(&self, slot: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(slot) }
    }

    pub fn disable_attribute(&self, slot: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(slot) }
    }

    pub fn active_texture_unit(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    pub fn bind_texture(&self, texture: Option<glow::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    pub fn unbind_texture(&self) {
        self.bind_texture(None);
    }

    // Per-frame operations consumed by the frame driver.

    pub fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Issues one indexed triangle-list draw call starting at offset 0.
    pub fn draw_indexed(&self, index_count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0)
        }
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        self.free_all();
    }
}
