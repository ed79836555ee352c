//! Renderable entities: shared GPU resources plus an owned transform.

use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::abs::context::GraphicsContext;
use crate::abs::mesh::Mesh;
use crate::abs::shader::ShaderProgram;
use crate::abs::texture::Texture;
use crate::math;

/// Uniform receiving the per-entity model matrix every draw.
pub const UNIFORM_TRANSFORMATION: &str = "transformation";
/// Uniform receiving the shared projection matrix, uploaded once at startup.
pub const UNIFORM_PROJECTION: &str = "projection";

/// Position, per-axis rotation in degrees and uniform scale, with the
/// derived matrix kept current on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    matrix: Mat4,
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        let mut transform = Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
            matrix: Mat4::IDENTITY,
        };
        transform.recompute();
        transform
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.recompute();
    }

    /// Adds per-axis degrees to the current rotation.
    pub fn rotate(&mut self, delta_deg: Vec3) {
        self.rotation += delta_deg;
        self.recompute();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.recompute();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    fn recompute(&mut self) {
        self.matrix = math::transformation_matrix(self.position, self.rotation, self.scale);
    }
}

/// Couples a mesh, a texture and a shader program (all shared, read-only)
/// with one live transform, and issues the draw call.
pub struct Entity {
    ctx: Rc<GraphicsContext>,
    mesh: Rc<Mesh>,
    texture: Rc<Texture>,
    shader: Rc<ShaderProgram>,
    transform: Transform,
}

impl Entity {
    pub fn new(
        ctx: Rc<GraphicsContext>,
        mesh: Rc<Mesh>,
        texture: Rc<Texture>,
        shader: Rc<ShaderProgram>,
        position: Vec3,
    ) -> Self {
        Self {
            ctx,
            mesh,
            texture,
            shader,
            transform: Transform::new(position),
        }
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.transform.translate(delta);
    }

    pub fn rotate(&mut self, delta_deg: Vec3) {
        self.transform.rotate(delta_deg);
    }

    /// Draws the entity: binds its program, vertex array and texture, uploads
    /// the current model matrix and issues one indexed draw. Global binding
    /// state is clean on return, so entities compose back-to-back within a
    /// frame.
    pub fn render(&self) {
        self.shader.bind();
        self.shader
            .set_uniform(UNIFORM_TRANSFORMATION, self.transform.matrix());
        self.ctx.bind_vertex_array(Some(self.mesh.vao()));
        for &slot in self.mesh.attributes() {
            self.ctx.enable_attribute(slot);
        }
        self.texture.bind_to_unit(0);
        self.ctx.draw_indexed(self.mesh.index_count());
        self.texture.unbind();
        for &slot in self.mesh.attributes() {
            self.ctx.disable_attribute(slot);
        }
        self.ctx.unbind_vertex_array();
        self.shader.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn new_transform_is_a_translation() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let transform = Transform::new(position);
        assert!(
            transform
                .matrix()
                .abs_diff_eq(Mat4::from_translation(position), EPSILON)
        );
    }

    #[test]
    fn translate_recomputes_the_matrix_eagerly() {
        let mut transform = Transform::new(Vec3::ZERO);
        transform.translate(Vec3::new(0.5, 0.0, -1.0));
        transform.translate(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(transform.position(), Vec3::new(1.0, 0.0, -1.0));
        assert!(
            transform
                .matrix()
                .abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, 0.0, -1.0)), EPSILON)
        );
    }

    #[test]
    fn rotate_accumulates_degrees_per_axis() {
        let mut transform = Transform::new(Vec3::ZERO);
        transform.rotate(Vec3::new(0.0, 30.0, 0.0));
        transform.rotate(Vec3::new(0.0, 60.0, 0.0));
        assert_eq!(transform.rotation(), Vec3::new(0.0, 90.0, 0.0));
        let expected = math::transformation_matrix(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), 1.0);
        assert!(transform.matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn scale_feeds_into_the_matrix() {
        let mut transform = Transform::new(Vec3::ZERO);
        transform.set_scale(2.5);
        assert!(
            transform
                .matrix()
                .abs_diff_eq(Mat4::from_scale(Vec3::splat(2.5)), EPSILON)
        );
    }
}
