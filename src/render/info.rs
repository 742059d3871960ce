use std::fmt;

use log::info;

use super::driver::{ShaderDriver, StringQuery};

/// Driver identification strings, as reported by the current context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub glsl_version: String,
}

impl SystemInfo {
    pub fn query<D: ShaderDriver>(driver: &D) -> Self {
        Self {
            vendor: driver.get_string(StringQuery::Vendor),
            renderer: driver.get_string(StringQuery::Renderer),
            version: driver.get_string(StringQuery::Version),
            glsl_version: driver.get_string(StringQuery::ShadingLanguageVersion),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your System:")?;
        write!(f, "\n  > Vendor: {}", self.vendor)?;
        write!(f, "\n  > Renderer: {}", self.renderer)?;
        write!(f, "\n  > OpenGL Version Support: {}", self.version)?;
        write!(f, "\n  > GLSL Version Support: {}", self.glsl_version)
    }
}

/// Formats the system report, printing it to stdout as well when asked.
pub fn get_system_info<D: ShaderDriver>(driver: &D, should_print: bool) -> String {
    let report = SystemInfo::query(driver).to_string();
    info!("{}", report);
    if should_print {
        println!("{}", report);
    }
    report
}
