//! Fatal error conditions. None of these are transient in this renderer's
//! model, so nothing is retried; they propagate to the frame driver, which
//! reports them and exits.

use std::path::PathBuf;

use crate::abs::shader::ShaderStage;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not compile {stage} shader '{name}': {log}")]
    ShaderCompile {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    #[error("could not link shader program '{name}': {log}")]
    ProgramLink { name: String, log: String },

    #[error("could not read shader source '{}': {source}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create {kind} object: {reason}")]
    ResourceCreate { kind: &'static str, reason: String },

    #[error("could not load texture '{}': {reason}", path.display())]
    TextureLoad { path: PathBuf, reason: String },

    #[error("could not load config '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}
