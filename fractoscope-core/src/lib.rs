pub mod cache;
pub mod complex;
pub mod controller;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod path;
pub mod render;
pub mod viewport;

// Re-export primary types for convenience.
pub use cache::{CacheSlot, RenderCache};
pub use complex::Complex;
pub use controller::{AppState, Event, InteractionController, StateDelta, DEFAULT_ZOOM_FACTOR};
pub use error::CoreError;
pub use fractal::{Mode, RenderSettings};
pub use julia::{JuliaParameter, JuliaParameterSelector};
pub use path::JuliaPath;
pub use render::{ArtifactPaths, FractalRenderer, RenderRequest};
pub use viewport::{Bounds, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
