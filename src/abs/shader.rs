//! OpenGL shader compilation, linking and uniform upload.
//!
//! [`Shader`] is a single compiled stage, [`ShaderProgram`] the linked pair.
//! Attribute slots are assigned from the position of each name in the binding
//! list handed to [`ShaderProgram::link`], so the list must use the same slot
//! numbering the meshes drawn with the program were built with. Uniform
//! locations are resolved once per name and cached; uploading to a name the
//! program does not expose is a silent no-op, per the driver contract.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use glow::HasContext;

use crate::abs::context::GraphicsContext;
use crate::error::RenderError;

/// The two programmable stages this renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// File extension under the shader source naming convention
    /// (`<name>.vs` / `<name>.fs`).
    fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Fragment => "fs",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// One entry of a program's attribute binding list. The entry's position in
/// the list is the attribute slot it binds; `Skip` leaves that slot unbound
/// by name so the shader's own slot assignment applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeBinding {
    Named(&'static str),
    Skip,
}

/// Pairs every named binding with the slot its list position assigns.
pub(crate) fn named_slots<'a>(
    bindings: &'a [AttributeBinding],
) -> impl Iterator<Item = (u32, &'static str)> + 'a {
    bindings
        .iter()
        .enumerate()
        .filter_map(|(slot, binding)| match binding {
            AttributeBinding::Named(name) => Some((slot as u32, *name)),
            AttributeBinding::Skip => None,
        })
}

/// Driver info logs can run long; diagnostics keep the head of the log.
fn truncate_log(log: String) -> String {
    log.chars().take(500).collect()
}

/// A compiled shader stage. Deleted when dropped; the owning program detaches
/// it first.
pub struct Shader {
    ctx: Rc<GraphicsContext>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles one stage from source. A compile failure is fatal for the
    /// program being built and carries the stage, the source identifier and
    /// the driver's diagnostic log.
    pub fn compile(
        ctx: &Rc<GraphicsContext>,
        stage: ShaderStage,
        name: &str,
        source: &str,
    ) -> Result<Self, RenderError> {
        let gl = ctx.gl();
        unsafe {
            let id = gl
                .create_shader(stage.gl_enum())
                .map_err(|reason| RenderError::ResourceCreate {
                    kind: "shader",
                    reason,
                })?;
            gl.shader_source(id, source);
            gl.compile_shader(id);
            if !gl.get_shader_compile_status(id) {
                let log = truncate_log(gl.get_shader_info_log(id));
                gl.delete_shader(id);
                return Err(RenderError::ShaderCompile {
                    stage,
                    name: name.to_string(),
                    log,
                });
            }
            Ok(Self {
                ctx: Rc::clone(ctx),
                id,
            })
        }
    }

    fn load(
        ctx: &Rc<GraphicsContext>,
        dir: &Path,
        name: &str,
        stage: ShaderStage,
    ) -> Result<Self, RenderError> {
        let path = dir.join(format!("{name}.{}", stage.extension()));
        log::debug!("compiling {stage} shader from '{}'", path.display());
        let source =
            std::fs::read_to_string(&path).map_err(|source| RenderError::ShaderSource {
                path: path.clone(),
                source,
            })?;
        Self::compile(ctx, stage, name, &source)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.ctx.gl().delete_shader(self.id);
        }
    }
}

/// A value that can be uploaded to a resolved uniform location.
pub trait Uniform {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for f32 {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_f32(Some(location), *self) }
    }
}

impl Uniform for i32 {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_i32(Some(location), *self) }
    }
}

impl Uniform for bool {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_i32(Some(location), *self as i32) }
    }
}

impl Uniform for Vec2 {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_2_f32(Some(location), self.x, self.y) }
    }
}

impl Uniform for Vec3 {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_3_f32(Some(location), self.x, self.y, self.z) }
    }
}

impl Uniform for Mat4 {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        // glam stores column-major, which is what the driver expects.
        unsafe { gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref()) }
    }
}

impl<T: Uniform> Uniform for &T {
    fn store(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).store(gl, location);
    }
}

/// A linked vertex + fragment program. Immutable once linked; torn down at
/// shutdown by detaching and deleting both stages and the program.
pub struct ShaderProgram {
    ctx: Rc<GraphicsContext>,
    id: glow::Program,
    vertex: Shader,
    fragment: Shader,
    uniforms: RefCell<HashMap<String, Option<glow::UniformLocation>>>,
}

impl ShaderProgram {
    /// Attaches both stages, binds the named attributes to their slots and
    /// links. A link failure is fatal and carries the driver's log.
    pub fn link(
        ctx: &Rc<GraphicsContext>,
        name: &str,
        vertex: Shader,
        fragment: Shader,
        bindings: &[AttributeBinding],
    ) -> Result<Self, RenderError> {
        let gl = ctx.gl();
        unsafe {
            let id = gl
                .create_program()
                .map_err(|reason| RenderError::ResourceCreate {
                    kind: "program",
                    reason,
                })?;
            gl.attach_shader(id, vertex.id);
            gl.attach_shader(id, fragment.id);
            for (slot, attr) in named_slots(bindings) {
                gl.bind_attrib_location(id, slot, attr);
            }
            gl.link_program(id);
            if !gl.get_program_link_status(id) {
                let log = truncate_log(gl.get_program_info_log(id));
                gl.detach_shader(id, vertex.id);
                gl.detach_shader(id, fragment.id);
                gl.delete_program(id);
                return Err(RenderError::ProgramLink {
                    name: name.to_string(),
                    log,
                });
            }
            gl.validate_program(id);
            let log = gl.get_program_info_log(id);
            if !log.trim().is_empty() {
                log::debug!("program '{name}' validation: {}", log.trim());
            }
            Ok(Self {
                ctx: Rc::clone(ctx),
                id,
                vertex,
                fragment,
                uniforms: RefCell::new(HashMap::new()),
            })
        }
    }

    /// Reads `<dir>/<name>.vs` and `<dir>/<name>.fs` as UTF-8 and builds the
    /// program from them. A read failure is fatal: nothing can be rendered
    /// without its shaders.
    pub fn load(
        ctx: &Rc<GraphicsContext>,
        dir: &Path,
        name: &str,
        bindings: &[AttributeBinding],
    ) -> Result<Self, RenderError> {
        let vertex = Shader::load(ctx, dir, name, ShaderStage::Vertex)?;
        let fragment = Shader::load(ctx, dir, name, ShaderStage::Fragment)?;
        Self::link(ctx, name, vertex, fragment, bindings)
    }

    /// Makes this program current for subsequent draw calls. Global-context
    /// state, not scoped to this instance.
    pub fn bind(&self) {
        unsafe {
            self.ctx.gl().use_program(Some(self.id));
        }
    }

    /// Clears the active program.
    pub fn unbind(&self) {
        unsafe {
            self.ctx.gl().use_program(None);
        }
    }

    /// Resolves a uniform name, caching the answer. A name the program does
    /// not expose resolves to `None` and stays `None`.
    pub fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        let mut cache = self.uniforms.borrow_mut();
        if let Some(cached) = cache.get(name) {
            return cached.clone();
        }
        let location = unsafe { self.ctx.gl().get_uniform_location(self.id, name) };
        cache.insert(name.to_string(), location.clone());
        location
    }

    /// Uploads a typed value to a named uniform. Unresolved names are a
    /// silent no-op.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.location(name) {
            value.store(self.ctx.gl(), &location);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            let gl = self.ctx.gl();
            gl.detach_shader(self.id, self.vertex.id);
            gl.detach_shader(self.id, self.fragment.id);
            gl.delete_program(self.id);
        }
        // The stage objects delete themselves when their fields drop.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_follows_list_position() {
        let bindings = [
            AttributeBinding::Named("position"),
            AttributeBinding::Named("uv"),
        ];
        let slots: Vec<_> = named_slots(&bindings).collect();
        assert_eq!(slots, vec![(0, "position"), (1, "uv")]);
    }

    #[test]
    fn skip_leaves_slot_unbound_without_shifting_later_slots() {
        let bindings = [
            AttributeBinding::Named("position"),
            AttributeBinding::Skip,
            AttributeBinding::Named("normal"),
        ];
        let slots: Vec<_> = named_slots(&bindings).collect();
        assert_eq!(slots, vec![(0, "position"), (2, "normal")]);
    }

    #[test]
    fn info_logs_are_truncated_to_500_chars() {
        let long = "x".repeat(2000);
        assert_eq!(truncate_log(long).len(), 500);
        assert_eq!(truncate_log("short".to_string()), "short");
    }
}
