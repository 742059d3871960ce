use thiserror::Error;

use crate::render::shaders::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed:\n{log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("Program linking failed:\n{0}")]
    Linking(String),

    #[error("Invalid GLSL version tag: {0:?}")]
    InvalidVersion(String),

    #[error("GLSL version {tag} has no {profile} profile")]
    UnsupportedProfile { tag: String, profile: &'static str },

    #[error("Empty {0} shader source")]
    EmptySource(ShaderStage),

    #[error("Failed to create {object} object: {reason}")]
    ObjectCreation { object: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid shading config: {0}")]
    Version(#[from] ShaderError),
}

pub type Result<T> = std::result::Result<T, ShaderError>;
