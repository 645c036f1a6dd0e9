//! PNG export with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use fractoscope_core::{Mode, RenderRequest};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

/// Metadata to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMetadata {
    pub mode: Mode,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub iteration_budget: u32,
    pub power: u32,
    pub julia_c: Option<(f64, f64)>,
}

impl ExportMetadata {
    pub fn from_request(request: &RenderRequest) -> Self {
        let b = request.bounds();
        Self {
            mode: request.mode,
            x_min: b.x_min,
            x_max: b.x_max,
            y_min: b.y_min,
            y_max: b.y_max,
            iteration_budget: request.settings.iteration_budget,
            power: request.settings.power,
            julia_c: request.parameter.map(|c| (c.re, c.im)),
        }
    }
}

/// Write an RGB buffer as a PNG file with embedded fractal metadata.
pub fn export_png(
    buffer: &RenderBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = std::fs::File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Fractoscope".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - x: [{}, {}], y: [{}, {}], Iterations: {}, Power: {}",
        meta.mode,
        meta.x_min,
        meta.x_max,
        meta.y_min,
        meta.y_max,
        meta.iteration_budget,
        meta.power,
    );
    if let Some((re, im)) = meta.julia_c {
        desc.push_str(&format!(", Julia C: {re} {im}i"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Fractoscope.Mode".into(), meta.mode.to_string()),
        ("Fractoscope.XMin".into(), meta.x_min.to_string()),
        ("Fractoscope.XMax".into(), meta.x_max.to_string()),
        ("Fractoscope.YMin".into(), meta.y_min.to_string()),
        ("Fractoscope.YMax".into(), meta.y_max.to_string()),
        (
            "Fractoscope.IterationBudget".into(),
            meta.iteration_budget.to_string(),
        ),
        ("Fractoscope.Power".into(), meta.power.to_string()),
    ];
    if let Some((re, im)) = meta.julia_c {
        pairs.push(("Fractoscope.JuliaC_Re".into(), re.to_string()));
        pairs.push(("Fractoscope.JuliaC_Im".into(), im.to_string()));
    }
    pairs
}
