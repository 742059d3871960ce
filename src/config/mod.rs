pub mod core;
pub mod rendering;

pub use self::core::ForgeConfig;
pub use rendering::{ShadingConfig, WindowConfig};
