/// SL3D Core Library - software scanline renderer for quad meshes
///
/// Loads a minimal OBJ subset, applies rigid transforms in place, projects
/// vertices through a fixed toy perspective and rasterizes the result into an
/// RGBA pixel buffer with a depth-priority test. Presentation, input capture
/// and frame pacing are left to the front-end crates.

pub mod compositor;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod state;
pub mod transform;

// Re-export commonly used types
pub use compositor::{Compositor, FrameReport, RenderMode};
pub use config::RenderConfig;
pub use error::{ConfigError, LoadError, RenderError};
pub use framebuffer::{PixelBuffer, Rgba};
pub use geometry::{Face, Mesh, Vertex};
pub use projection::{ProjectedVertex, Projector};
pub use state::{Action, ParseActionError, RenderState};
pub use transform::{EulerDegrees, Transform};
