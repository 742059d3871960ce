use anyhow::{anyhow, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, sync::Arc};
use winit::{dpi::LogicalSize, event_loop::EventLoop, window::WindowBuilder};

use windforge::{
    config::{ForgeConfig, WindowConfig},
    render::shaders::builtin,
    get_system_info, GlowDriver, GlslProfile, GlslVersion, ProgramLinker, ShaderDriver,
};

fn load_config() -> Result<ForgeConfig> {
    match ForgeConfig::default_path() {
        Some(path) => Ok(ForgeConfig::load_or_default(&path)?),
        None => Ok(ForgeConfig::default()),
    }
}

/// ES contexts take their version from the GLSL ES version, not the window
/// config.
fn context_api(window: &WindowConfig, glsl: &GlslVersion) -> (ContextApi, GlProfile) {
    if let Some((major, minor)) = glsl.gles_context_version() {
        return (ContextApi::Gles(Some(Version::new(major, minor))), GlProfile::Core);
    }
    let version = Some(Version::new(window.gl_major, window.gl_minor));
    match glsl.profile() {
        Some(GlslProfile::Compatibility) => (ContextApi::OpenGl(version), GlProfile::Compatibility),
        _ => (ContextApi::OpenGl(version), GlProfile::Core),
    }
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    let config = load_config()?;
    info!("Opening {}.{} context...", config.window.gl_major, config.window.gl_minor);

    let event_loop = EventLoop::new()?;
    let window_builder = WindowBuilder::new()
        .with_title(config.window.title.as_str())
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        .with_visible(false);

    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

    let (window, gl_config) = display_builder
        .build(&event_loop, template, |configs| {
            configs
                .reduce(|accum, candidate| {
                    if candidate.num_samples() > accum.num_samples() {
                        candidate
                    } else {
                        accum
                    }
                })
                .expect("display offered no GL configs")
        })
        .map_err(|e| anyhow!("Failed to build GL display: {e}"))?;
    let window = window.ok_or_else(|| anyhow!("Display builder returned no window"))?;

    let glsl = config.shading.version()?;
    let (api, profile) = context_api(&config.window, &glsl);
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(api)
        .with_profile(profile)
        .build(Some(window.raw_window_handle()));

    let gl_display = gl_config.display();
    let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

    let attrs = window.build_surface_attributes(<_>::default());
    let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
    let _gl_context = gl_context.make_current(&gl_surface)?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|symbol| {
            let symbol = CString::new(symbol).expect("GL symbol names contain no NUL");
            gl_display.get_proc_address(symbol.as_c_str())
        })
    });

    // SAFETY: the context was made current on this thread above and outlives
    // `driver`, which is dropped at the end of `main`.
    let driver = unsafe { GlowDriver::new(gl) };

    get_system_info(&driver, config.shading.print_system_info);

    let linker = ProgramLinker::from_config(&driver, &config.shading)?;
    let program = linker.create_program(builtin::VERTEX_SRC, builtin::FRAGMENT_SRC)?;
    info!("Built-in shaders linked into program {:?} (GLSL {})", program, linker.version());
    driver.delete_program(program);

    Ok(())
}
