use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use fractoscope_core::{FractalRenderer, Mode, RenderRequest, Viewport};

use crate::buffer::{RenderBuffer, BYTES_PER_PIXEL};
use crate::error::RenderError;
use crate::escape::{Fractal, Julia, Mandelbrot};
use crate::export::{export_png, ExportMetadata};
use crate::palette::color_for;

/// The result of a full-frame render.
pub struct RenderResult {
    pub buffer: RenderBuffer,
    pub elapsed: Duration,
}

/// Render every pixel of `viewport` in parallel, one Rayon task per row.
///
/// Each pixel is sampled at the point [`Viewport::pixel_to_complex`] maps
/// it to, so clicks land exactly where they appear on the image.
pub fn render<F: Fractal + Sync>(fractal: &F, viewport: &Viewport) -> RenderResult {
    let start = Instant::now();
    let mut buffer = RenderBuffer::new(viewport.width(), viewport.height());
    let stride = buffer.stride();
    let budget = fractal.budget();
    debug!(
        width = viewport.width(),
        height = viewport.height(),
        budget,
        "Starting render"
    );

    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let point = viewport.pixel_to_complex(px as i64, py as i64);
                pixel.copy_from_slice(&color_for(fractal.iterate(point), budget));
            }
        });

    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_millis(), "Render complete");
    RenderResult { buffer, elapsed }
}

/// Render a request into memory without touching the filesystem.
pub fn render_request(request: &RenderRequest) -> crate::Result<RenderResult> {
    request.settings.validate()?;
    let result = match request.mode {
        Mode::Mandelbrot => render(&Mandelbrot::new(request.settings), &request.viewport),
        Mode::Julia => {
            let c = request.parameter.ok_or_else(|| RenderError::InvalidParameters {
                reason: "Julia render requires a parameter".into(),
            })?;
            render(&Julia::new(c, request.settings), &request.viewport)
        }
    };
    Ok(result)
}

/// Renders requests to PNG files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeTimeRenderer;

impl EscapeTimeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl FractalRenderer for EscapeTimeRenderer {
    type Error = RenderError;

    fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let result = render_request(request)?;
        if let Some(parent) = request.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        export_png(
            &result.buffer,
            &request.out_path,
            &ExportMetadata::from_request(request),
        )
    }
}
