use serde::{Deserialize, Serialize};

use crate::render::program::ShaderRetention;
use crate::render::shaders::{GlslProfile, GlslVersion};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    pub glsl_version: String,
    pub profile: Option<GlslProfile>,
    pub shader_retention: ShaderRetention,
    pub print_system_info: bool,
}

impl ShadingConfig {
    pub fn version(&self) -> Result<GlslVersion> {
        GlslVersion::parse(&self.glsl_version)?.with_profile(self.profile)
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            glsl_version: GlslVersion::DEFAULT_TAG.to_string(),
            profile: None,
            shader_retention: ShaderRetention::Release,
            print_system_info: true,
        }
    }
}

/// Window and context settings for the demo binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "windforge".to_string(),
            width: 800,
            height: 600,
            gl_major: 3,
            gl_minor: 3,
        }
    }
}
