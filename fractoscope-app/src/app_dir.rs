//! Directory where the executable lives. Preferences and rendered images are
//! stored next to the app so a standalone binary carries its own state.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default directory for the Mandelbrot and Julia artifacts.
pub fn renders_directory() -> PathBuf {
    exe_directory().join("renders")
}
