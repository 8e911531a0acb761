pub mod config;
pub mod error;
pub mod model;
pub mod surface;

pub use config::SketchConfig;
pub use error::{ConfigError, ExportError, SurfaceAllocationError};
pub use model::*;
pub use surface::{DrawingSurface, ImageFormat, SurfaceSize};
