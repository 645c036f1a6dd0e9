//! Batch rendering of Julia sets whose constant walks along a [`JuliaPath`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use fractoscope_core::{
    Complex, CoreError, FractalRenderer, JuliaPath, Mode, RenderRequest, RenderSettings, Viewport,
};

#[derive(Debug, Error)]
pub enum SeriesError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Path(#[from] CoreError),

    #[error("frame {index} (c = {c}) failed: {source}")]
    Frame {
        index: usize,
        c: Complex,
        #[source]
        source: E,
    },
}

/// File name of frame `index`; zero-padded so frames sort in path order.
pub fn frame_file(index: usize) -> String {
    format!("{index:04}.png")
}

/// Render one Julia set per point of `path` into `dir`, in order.
///
/// Stops at the first frame that fails; frames already written stay on disk.
pub fn render_series<R: FractalRenderer>(
    renderer: &R,
    path: &JuliaPath,
    viewport: Viewport,
    settings: RenderSettings,
    dir: &Path,
) -> Result<Vec<PathBuf>, SeriesError<R::Error>> {
    let points = path.points()?;
    let total = points.len();
    let start = Instant::now();
    info!(kind = path.label(), total, dir = %dir.display(), "Rendering Julia series");

    let mut frames = Vec::with_capacity(total);
    for (index, c) in points.into_iter().enumerate() {
        let request = RenderRequest {
            mode: Mode::Julia,
            viewport,
            parameter: Some(c),
            settings,
            out_path: dir.join(frame_file(index)),
        };
        renderer
            .render(&request)
            .map_err(|source| SeriesError::Frame { index, c, source })?;
        info!(frame = index + 1, total, %c, "Series frame rendered");
        frames.push(request.out_path);
    }

    info!(
        total,
        elapsed_ms = start.elapsed().as_millis(),
        "Julia series complete"
    );
    Ok(frames)
}
