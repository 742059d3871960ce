use std::marker::PhantomData;
use std::sync::Arc;

use glow::HasContext as _;

use super::driver::{ShaderDriver, StringQuery};
use super::shaders::ShaderStage;

/// [`ShaderDriver`] over a `glow` OpenGL context.
///
/// Not `Send` or `Sync`: GL calls must stay on the thread that owns the
/// current context.
pub struct GlowDriver {
    gl: Arc<glow::Context>,
    _not_send: PhantomData<*const ()>,
}

impl GlowDriver {
    /// # Safety
    ///
    /// `gl` must have been loaded from a context that is current on this
    /// thread, and must stay current for as long as the driver is used.
    pub unsafe fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl,
            _not_send: PhantomData,
        }
    }
}

fn string_enum(query: StringQuery) -> u32 {
    match query {
        StringQuery::Vendor => glow::VENDOR,
        StringQuery::Renderer => glow::RENDERER,
        StringQuery::Version => glow::VERSION,
        StringQuery::ShadingLanguageVersion => glow::SHADING_LANGUAGE_VERSION,
    }
}

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

// SAFETY (all blocks below): `GlowDriver::new` requires the context to be
// current on this thread, and the type cannot leave it.
impl ShaderDriver for GlowDriver {
    type Shader = glow::Shader;
    type Program = glow::Program;

    // glow decodes the driver string as UTF-8 and panics on anything else.
    // Every desktop and ES driver reports ASCII here.
    fn get_string(&self, query: StringQuery) -> String {
        unsafe { self.gl.get_parameter_string(string_enum(query)) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(stage_enum(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn is_program(&self, program: Self::Program) -> bool {
        unsafe { self.gl.is_program(program) }
    }
}
