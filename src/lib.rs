pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::{ForgeConfig, ShadingConfig, WindowConfig};
pub use render::{
    compile_glsl_shader, create_glsl_program, get_system_info, GlowDriver, GlslProfile,
    GlslVersion, ProgramLinker, ShaderDriver, ShaderRetention, ShaderStage, StringQuery,
    SystemInfo,
};
pub use utils::error::{ConfigError, ShaderError};
