mod app_dir;
mod command;
mod preferences;
mod series;
mod session;

use std::process::ExitCode;

use tracing::{error, info};

use fractoscope_core::{ArtifactPaths, InteractionController};
use fractoscope_render::EscapeTimeRenderer;

use preferences::AppPreferences;
use session::Session;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Fractoscope");

    let mut prefs = AppPreferences::load();
    let state = match prefs.build_state() {
        Ok(state) => state,
        Err(e) => {
            error!("Invalid preferences: {e}");
            return ExitCode::FAILURE;
        }
    };
    let render_dir = prefs.render_directory();
    info!(
        viewport = %state.viewport(),
        dir = %render_dir.display(),
        "Session ready"
    );

    let mut session = Session::new(
        InteractionController::new(state),
        EscapeTimeRenderer::new(),
        ArtifactPaths::in_dir(&render_dir),
        render_dir.join("series"),
    );
    session.run(std::io::stdin().lock());

    prefs.remember(session.controller().state());
    prefs.save();
    ExitCode::SUCCESS
}
