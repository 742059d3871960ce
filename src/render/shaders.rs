// shaders.rs - GLSL version handling and single-stage compilation

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::driver::ShaderDriver;
use crate::utils::error::{Result, ShaderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Compute => "compute",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlslProfile {
    Core,
    Compatibility,
    Es,
}

impl GlslProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            GlslProfile::Core => "core",
            GlslProfile::Compatibility => "compatibility",
            GlslProfile::Es => "es",
        }
    }
}

const ES_TOKENS: [&str; 4] = ["100", "300", "310", "320"];

/// A dotted GLSL version tag such as `"3.3.0"` and the `#version` token
/// derived from it (`"330"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlslVersion {
    tag: String,
    token: String,
    profile: Option<GlslProfile>,
}

impl GlslVersion {
    pub const DEFAULT_TAG: &'static str = "3.3.0";

    /// Every dot-separated component must be a non-empty run of ASCII digits.
    pub fn parse(tag: &str) -> Result<Self> {
        let valid = tag
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
        if !valid {
            return Err(ShaderError::InvalidVersion(tag.to_string()));
        }

        Ok(Self {
            tag: tag.to_string(),
            token: tag.replace('.', ""),
            profile: None,
        })
    }

    /// GLSL ES only exists as 100, 300, 310 and 320.
    pub fn with_profile(mut self, profile: Option<GlslProfile>) -> Result<Self> {
        if profile == Some(GlslProfile::Es) && !ES_TOKENS.contains(&self.token.as_str()) {
            return Err(ShaderError::UnsupportedProfile {
                tag: self.tag,
                profile: GlslProfile::Es.as_str(),
            });
        }
        self.profile = profile;
        Ok(self)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn profile(&self) -> Option<GlslProfile> {
        self.profile
    }

    pub fn directive(&self) -> String {
        match self.profile {
            Some(profile) => format!("#version {} {}", self.token, profile.as_str()),
            None => format!("#version {}", self.token),
        }
    }

    pub fn prepend_to(&self, source: &str) -> String {
        format!("{}\n{}", self.directive(), source)
    }

    /// OpenGL ES context version matching an ES profile (`300 es` -> 3.0,
    /// `100 es` -> 2.0).
    pub fn gles_context_version(&self) -> Option<(u8, u8)> {
        match (self.profile?, self.token.as_str()) {
            (GlslProfile::Es, "100") => Some((2, 0)),
            (GlslProfile::Es, "300") => Some((3, 0)),
            (GlslProfile::Es, "310") => Some((3, 1)),
            (GlslProfile::Es, "320") => Some((3, 2)),
            _ => None,
        }
    }
}

impl Default for GlslVersion {
    fn default() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_string(),
            token: "330".to_string(),
            profile: None,
        }
    }
}

impl FromStr for GlslVersion {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GlslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Compiles one stage. On success the shader stays alive in the driver
/// context; on failure it has already been deleted.
pub fn compile_glsl_shader<D: ShaderDriver>(
    driver: &D,
    source: &str,
    stage: ShaderStage,
    version: &GlslVersion,
) -> Result<D::Shader> {
    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource(stage));
    }
    if source.trim_start().starts_with("#version") {
        warn!(
            "{} shader source already declares #version; prepending {}",
            stage,
            version.directive()
        );
    }

    let code = version.prepend_to(source);

    let shader = driver
        .create_shader(stage)
        .map_err(|reason| ShaderError::ObjectCreation { object: "shader", reason })?;

    driver.shader_source(shader, &code);
    driver.compile_shader(shader);

    if !driver.compile_status(shader) {
        // The log has to be read while the handle is still valid.
        let log = driver.shader_info_log(shader);
        driver.delete_shader(shader);
        warn!("{} shader failed to compile: {}", stage, log.trim_end());
        return Err(ShaderError::Compilation { stage, log });
    }

    debug!("Compiled {} shader {:?} (GLSL {})", stage, shader, version);
    Ok(shader)
}

/// Built-in pass-through shader pair, written without a `#version` line.
pub mod builtin {
    pub const VERTEX_SRC: &str = r#"
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

out vec3 Color;

void main() {
    Color = aColor;
    gl_Position = vec4(aPos, 1.0);
}
"#;

    pub const FRAGMENT_SRC: &str = r#"
in vec3 Color;

out vec4 FragColor;

void main() {
    FragColor = vec4(Color, 1.0);
}
"#;
}
