//! The slice of a GL driver that shader compilation and linking need.
//!
//! Handles are opaque and owned by the driver's context. Implementations are
//! expected to be used from the one thread that has the context current.

use std::fmt;

use super::shaders::ShaderStage;

/// Read-only driver identification strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringQuery {
    Vendor,
    Renderer,
    Version,
    ShadingLanguageVersion,
}

pub trait ShaderDriver {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;

    fn get_string(&self, query: StringQuery) -> String;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn is_program(&self, program: Self::Program) -> bool;
}
