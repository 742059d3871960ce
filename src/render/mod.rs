pub mod driver;
pub mod glow_driver;
pub mod info;
pub mod program;
pub mod shaders;

#[cfg(test)]
pub(crate) mod mock;

pub use driver::{ShaderDriver, StringQuery};
pub use glow_driver::GlowDriver;
pub use info::{get_system_info, SystemInfo};
pub use program::{create_glsl_program, ProgramLinker, ShaderRetention};
pub use shaders::{compile_glsl_shader, GlslProfile, GlslVersion, ShaderStage};
