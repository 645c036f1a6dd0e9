use std::io::BufRead;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use fractoscope_core::{ArtifactPaths, FractalRenderer, InteractionController, JuliaPath, Mode};

use crate::command::{self, Command};
use crate::series;

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives an [`InteractionController`] from text commands and keeps the
/// current mode's artifact up to date.
pub struct Session<R: FractalRenderer> {
    controller: InteractionController,
    renderer: R,
    paths: ArtifactPaths,
    series_dir: PathBuf,
}

impl<R: FractalRenderer> Session<R> {
    /// Series frames go to `series_dir/<path kind>/`.
    pub fn new(
        controller: InteractionController,
        renderer: R,
        paths: ArtifactPaths,
        series_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            controller,
            renderer,
            paths,
            series_dir: series_dir.into(),
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Render the current mode if stale. Failures are logged and leave the
    /// slot stale, so the next command retries.
    pub fn refresh(&mut self) {
        match self.controller.refresh(&self.renderer, &self.paths) {
            Ok(Some(path)) => println!("{} -> {}", self.controller.current_mode(), path.display()),
            Ok(None) => debug!("Current artifact is up to date"),
            Err(e) => debug!("Render will be retried on the next event: {e}"),
        }
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Input(event) => {
                match self.controller.on_event(event) {
                    Ok(delta) => {
                        if delta.needs_render.is_some() {
                            self.refresh();
                        } else if delta.mode_changed {
                            self.show_current();
                        }
                    }
                    Err(e) => warn!("Ignored {event:?}: {e}"),
                }
                Flow::Continue
            }
            Command::Series(path) => {
                self.render_series(&path);
                Flow::Continue
            }
            Command::Status => {
                println!("{}", self.status());
                Flow::Continue
            }
            Command::Quit => Flow::Quit,
        }
    }

    /// Read commands until end of input or `quit`.
    pub fn run(&mut self, input: impl BufRead) {
        self.refresh();
        for line in input.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    error!("Failed to read command: {e}");
                    break;
                }
            };
            match command::parse(&line) {
                Ok(Some(cmd)) => {
                    if self.apply(cmd) == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            }
        }
        info!("Session ended");
    }

    /// Julia frames at the home view of the current grid and settings.
    /// The cache is not touched.
    fn render_series(&self, path: &JuliaPath) {
        let state = self.controller.state();
        let dir = self.series_dir.join(path.label());
        match series::render_series(
            &self.renderer,
            path,
            state.viewport().reset(),
            state.settings(),
            &dir,
        ) {
            Ok(frames) => println!(
                "{} series: {} frames -> {}",
                path.label(),
                frames.len(),
                dir.display()
            ),
            Err(e) => error!("Series aborted: {e}"),
        }
    }

    fn show_current(&self) {
        let mode = self.controller.current_mode();
        if let Some(path) = self.controller.state().cache().artifact(mode) {
            println!("{mode} -> {}", path.display());
        }
    }

    /// One-line summary of mode, viewport, constant and cache state.
    pub fn status(&self) -> String {
        let state = self.controller.state();
        let stale = |m: Mode| if self.controller.is_stale(m) { "stale" } else { "valid" };
        format!(
            "mode={} viewport={} julia=[{}] mandelbrot={} julia_slot={}",
            state.mode(),
            state.viewport(),
            state.julia_parameter(),
            stale(Mode::Mandelbrot),
            stale(Mode::Julia),
        )
    }
}
