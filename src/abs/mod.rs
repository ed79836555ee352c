//! The GPU resource and rendering abstraction layer: context and resource
//! registry, buffer encoding, meshes, shader programs and textures.

pub mod app;
pub mod buffer;
pub mod context;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use buffer::*;
pub use context::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
