pub mod buffer;
pub mod error;
pub mod escape;
pub mod export;
pub mod palette;
pub mod renderer;

pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use escape::{escape_time, Fractal, Julia, Mandelbrot};
pub use export::{export_png, ExportMetadata};
pub use renderer::{render, render_request, EscapeTimeRenderer, RenderResult};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
