//! The contract an external fractal renderer fulfils for the controller.

use std::path::{Path, PathBuf};

use crate::complex::Complex;
use crate::fractal::{Mode, RenderSettings};
use crate::viewport::{Bounds, Viewport};

pub const MANDELBROT_FILE: &str = "mandel.png";
pub const JULIA_FILE: &str = "julia.png";

/// Everything a renderer needs to produce one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub mode: Mode,
    /// Pixel grid and visible rectangle.
    pub viewport: Viewport,
    /// The Julia constant; `None` for Mandelbrot.
    pub parameter: Option<Complex>,
    pub settings: RenderSettings,
    pub out_path: PathBuf,
}

impl RenderRequest {
    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }
}

/// A renderer that writes an image for a [`RenderRequest`] to its `out_path`.
///
/// Implementations may block. The controller calls them outside of event
/// handling and only marks a cache slot valid when `render` returns `Ok`.
pub trait FractalRenderer {
    type Error: std::error::Error + 'static;

    fn render(&self, request: &RenderRequest) -> Result<(), Self::Error>;
}

/// Where each mode's artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub mandelbrot: PathBuf,
    pub julia: PathBuf,
}

impl ArtifactPaths {
    /// `mandel.png` and `julia.png` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            mandelbrot: dir.join(MANDELBROT_FILE),
            julia: dir.join(JULIA_FILE),
        }
    }

    pub fn for_mode(&self, mode: Mode) -> &Path {
        match mode {
            Mode::Mandelbrot => &self.mandelbrot,
            Mode::Julia => &self.julia,
        }
    }
}
