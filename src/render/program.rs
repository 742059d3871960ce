use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::driver::ShaderDriver;
use super::shaders::{compile_glsl_shader, GlslVersion, ShaderStage};
use crate::config::ShadingConfig;
use crate::utils::error::{Result, ShaderError};

/// What happens to the per-stage shader objects once linking was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderRetention {
    /// Detach and delete them, whether the link succeeded or not.
    #[default]
    Release,
    /// Leave them attached to the program.
    Keep,
}

/// Compiles and links shader stages against one driver with a fixed
/// GLSL version.
pub struct ProgramLinker<'d, D: ShaderDriver> {
    driver: &'d D,
    version: GlslVersion,
    retention: ShaderRetention,
}

impl<'d, D: ShaderDriver> ProgramLinker<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self {
            driver,
            version: GlslVersion::default(),
            retention: ShaderRetention::default(),
        }
    }

    pub fn from_config(driver: &'d D, config: &ShadingConfig) -> Result<Self> {
        Ok(Self {
            driver,
            version: config.version()?,
            retention: config.shader_retention,
        })
    }

    pub fn with_version(mut self, version: GlslVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_retention(mut self, retention: ShaderRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn version(&self) -> &GlslVersion {
        &self.version
    }

    pub fn compile(&self, source: &str, stage: ShaderStage) -> Result<D::Shader> {
        compile_glsl_shader(self.driver, source, stage, &self.version)
    }

    pub fn create_program(&self, vertex_source: &str, fragment_source: &str) -> Result<D::Program> {
        self.link(&[
            (ShaderStage::Vertex, vertex_source),
            (ShaderStage::Fragment, fragment_source),
        ])
    }

    pub fn with_geometry(
        &self,
        vertex_source: &str,
        geometry_source: &str,
        fragment_source: &str,
    ) -> Result<D::Program> {
        self.link(&[
            (ShaderStage::Vertex, vertex_source),
            (ShaderStage::Geometry, geometry_source),
            (ShaderStage::Fragment, fragment_source),
        ])
    }

    /// Compiles every stage in order, then links them into one program.
    ///
    /// A compile failure stops before any program object exists, and the
    /// stages compiled so far are deleted. A link failure deletes the program.
    pub fn link(&self, stages: &[(ShaderStage, &str)]) -> Result<D::Program> {
        let driver = self.driver;

        let mut shaders = Vec::with_capacity(stages.len());
        for &(stage, source) in stages {
            match self.compile(source, stage) {
                Ok(shader) => shaders.push(shader),
                Err(err) => {
                    self.delete_shaders(&shaders);
                    return Err(err);
                }
            }
        }

        let program = match driver.create_program() {
            Ok(program) => program,
            Err(reason) => {
                self.delete_shaders(&shaders);
                return Err(ShaderError::ObjectCreation { object: "program", reason });
            }
        };

        for &shader in &shaders {
            driver.attach_shader(program, shader);
        }
        driver.link_program(program);
        let linked = driver.link_status(program);

        if self.retention == ShaderRetention::Release {
            for &shader in &shaders {
                driver.detach_shader(program, shader);
            }
            self.delete_shaders(&shaders);
        }

        if !linked {
            let log = driver.program_info_log(program);
            driver.delete_program(program);
            warn!("Program failed to link: {}", log.trim_end());
            return Err(ShaderError::Linking(log));
        }

        info!(
            "Linked program {:?} from {} stages (GLSL {})",
            program,
            shaders.len(),
            self.version
        );
        Ok(program)
    }

    fn delete_shaders(&self, shaders: &[D::Shader]) {
        for &shader in shaders {
            debug!("Deleting shader {:?}", shader);
            self.driver.delete_shader(shader);
        }
    }
}

/// Vertex + fragment program with the default retention policy.
pub fn create_glsl_program<D: ShaderDriver>(
    driver: &D,
    vertex_source: &str,
    fragment_source: &str,
    version: &GlslVersion,
) -> Result<D::Program> {
    ProgramLinker::new(driver)
        .with_version(version.clone())
        .create_program(vertex_source, fragment_source)
}
