use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use fractoscope_core::{
    AppState, Complex, JuliaParameter, RenderSettings, Viewport, DEFAULT_ZOOM_FACTOR,
};

/// Session settings persisted as JSON next to the executable.
///
/// Every field falls back to its default when missing, so older or
/// hand-edited files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    /// Pixel grid is `16·pixel_scale × 9·pixel_scale` (120 → 1920×1080).
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: u32,
    #[serde(default = "default_iteration_budget")]
    pub iteration_budget: u32,
    #[serde(default = "default_power")]
    pub power: u32,
    /// Wheel-out multiplies the view size by this; wheel-in divides by it.
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default = "default_julia_c_re")]
    pub julia_c_re: f64,
    #[serde(default)]
    pub julia_c_im: f64,
    /// Where artifacts are written. Empty means `renders/` next to the executable.
    #[serde(default)]
    pub render_dir: String,
}

fn default_pixel_scale() -> u32 {
    120
}
fn default_iteration_budget() -> u32 {
    RenderSettings::DEFAULT_ITERATION_BUDGET
}
fn default_power() -> u32 {
    RenderSettings::DEFAULT_POWER
}
fn default_zoom_factor() -> f64 {
    DEFAULT_ZOOM_FACTOR
}
fn default_julia_c_re() -> f64 {
    JuliaParameter::default_c().re
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            pixel_scale: default_pixel_scale(),
            iteration_budget: default_iteration_budget(),
            power: default_power(),
            zoom_factor: default_zoom_factor(),
            julia_c_re: default_julia_c_re(),
            julia_c_im: 0.0,
            render_dir: String::new(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Build the startup state: home view, Mandelbrot mode, both slots stale.
    pub fn build_state(&self) -> fractoscope_core::Result<AppState> {
        let viewport = Viewport::from_pixel_scale(self.pixel_scale)?;
        let settings = RenderSettings::new(self.iteration_budget, self.power)?;
        let julia = JuliaParameter::new(Complex::new(self.julia_c_re, self.julia_c_im));
        AppState::new(viewport, julia, settings, self.zoom_factor)
    }

    /// Carry session choices worth keeping into the next run.
    pub fn remember(&mut self, state: &AppState) {
        let c = state.julia_parameter().c();
        self.julia_c_re = c.re;
        self.julia_c_im = c.im;
    }

    pub fn render_directory(&self) -> PathBuf {
        if self.render_dir.trim().is_empty() {
            crate::app_dir::renders_directory()
        } else {
            PathBuf::from(&self.render_dir)
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
