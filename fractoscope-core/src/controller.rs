use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cache::RenderCache;
use crate::error::CoreError;
use crate::fractal::{Mode, RenderSettings};
use crate::julia::{JuliaParameter, JuliaParameterSelector};
use crate::render::{ArtifactPaths, FractalRenderer, RenderRequest};
use crate::viewport::Viewport;

/// Default ratio between successive wheel zoom levels.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.25;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the explorer knows between two input events.
///
/// Fields are only reachable through accessors so that a viewport or Julia
/// constant can never change without the matching cache slots being
/// invalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    mode: Mode,
    viewport: Viewport,
    julia: JuliaParameterSelector,
    cache: RenderCache,
    settings: RenderSettings,
    zoom_factor: f64,
}

impl AppState {
    /// Start in Mandelbrot mode with both cache slots stale.
    pub fn new(
        viewport: Viewport,
        julia: JuliaParameter,
        settings: RenderSettings,
        zoom_factor: f64,
    ) -> crate::Result<Self> {
        settings.validate()?;
        if !(zoom_factor > 0.0) || !zoom_factor.is_finite() {
            return Err(CoreError::InvalidParameters {
                reason: format!("zoom factor must be > 0.0 and finite, got {zoom_factor}"),
            });
        }
        Ok(Self {
            mode: Mode::Mandelbrot,
            viewport,
            julia: JuliaParameterSelector::new(julia),
            cache: RenderCache::new(),
            settings,
            zoom_factor,
        })
    }

    /// Home view on `viewport`'s grid with default constant and settings.
    pub fn with_defaults(viewport: Viewport) -> Self {
        Self {
            mode: Mode::Mandelbrot,
            viewport,
            julia: JuliaParameterSelector::default(),
            cache: RenderCache::new(),
            settings: RenderSettings::default(),
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn julia_parameter(&self) -> JuliaParameter {
        self.julia.current()
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Build the request that would refresh `mode` from the current state.
    pub fn render_request(&self, mode: Mode, paths: &ArtifactPaths) -> RenderRequest {
        RenderRequest {
            mode,
            viewport: self.viewport,
            parameter: match mode {
                Mode::Mandelbrot => None,
                Mode::Julia => Some(self.julia.current().c()),
            },
            settings: self.settings,
            out_path: paths.for_mode(mode).to_path_buf(),
        }
    }

    /// Install a new viewport. Both renderings depend on it.
    fn replace_viewport(&mut self, viewport: Viewport, delta: &mut StateDelta) {
        self.viewport = viewport;
        self.cache.invalidate_all();
        delta.mandelbrot_invalidated = true;
        delta.julia_invalidated = true;
    }
}

// ---------------------------------------------------------------------------
// Events and deltas
// ---------------------------------------------------------------------------

/// A discrete input event, with pixel coordinates where relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Wheel rotated away from the user: zoom in around the pixel.
    WheelForward { x: i64, y: i64 },
    /// Wheel rotated toward the user: zoom out around the pixel.
    WheelBackward { x: i64, y: i64 },
    /// Re-centre the view on the pixel.
    LeftClick { x: i64, y: i64 },
    /// Pick a Julia constant (in Mandelbrot mode) or return to Mandelbrot.
    RightClick { x: i64, y: i64 },
    ToggleMode,
    Reset,
}

/// What a single event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateDelta {
    pub mandelbrot_invalidated: bool,
    pub julia_invalidated: bool,
    pub mode_changed: bool,
    /// The current mode, if its artifact is stale and should be re-rendered.
    pub needs_render: Option<Mode>,
}

impl StateDelta {
    pub fn invalidated(&self, mode: Mode) -> bool {
        match mode {
            Mode::Mandelbrot => self.mandelbrot_invalidated,
            Mode::Julia => self.julia_invalidated,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Applies input events to an [`AppState`] one at a time.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: AppState,
}

impl InteractionController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn current_mode(&self) -> Mode {
        self.state.mode
    }

    /// A copy of the current viewport.
    pub fn current_viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn is_stale(&self, mode: Mode) -> bool {
        !self.state.cache.is_valid(mode)
    }

    /// Apply one event. On error the state is left exactly as it was.
    pub fn on_event(&mut self, event: Event) -> crate::Result<StateDelta> {
        let state = &mut self.state;
        let mut delta = StateDelta::default();

        match event {
            Event::WheelForward { x, y } => {
                let center = state.viewport.pixel_to_complex(x, y);
                let zoomed = state.viewport.zoom(center, 1.0 / state.zoom_factor)?;
                state.replace_viewport(zoomed, &mut delta);
            }
            Event::WheelBackward { x, y } => {
                let center = state.viewport.pixel_to_complex(x, y);
                let zoomed = state.viewport.zoom(center, state.zoom_factor)?;
                state.replace_viewport(zoomed, &mut delta);
            }
            Event::LeftClick { x, y } => {
                let target = state.viewport.pixel_to_complex(x, y);
                let panned = state.viewport.pan(target)?;
                state.replace_viewport(panned, &mut delta);
            }
            Event::RightClick { x, y } => match state.mode {
                Mode::Mandelbrot => {
                    let param = state.julia.select(x, y, &state.viewport);
                    if state.julia.replace(param) {
                        state.cache.invalidate(Mode::Julia);
                        delta.julia_invalidated = true;
                    }
                    state.mode = Mode::Julia;
                    delta.mode_changed = true;
                }
                Mode::Julia => {
                    state.mode = Mode::Mandelbrot;
                    delta.mode_changed = true;
                }
            },
            Event::ToggleMode => {
                state.mode = state.mode.toggled();
                delta.mode_changed = true;
            }
            Event::Reset => {
                let home = state.viewport.reset();
                state.replace_viewport(home, &mut delta);
            }
        }

        if !state.cache.is_valid(state.mode) {
            delta.needs_render = Some(state.mode);
        }
        debug!(?event, ?delta, mode = %state.mode, viewport = %state.viewport, "Event applied");
        Ok(delta)
    }

    /// Record that `artifact` now reflects the current state for `mode`.
    pub fn mark_valid(&mut self, mode: Mode, artifact: impl Into<PathBuf>) {
        self.state.cache.mark_valid(mode, artifact);
    }

    /// Render the current mode if it is stale.
    ///
    /// Returns the artifact path when a render happened, `None` when the
    /// slot was already valid. A renderer error is returned verbatim and the
    /// slot stays stale so the caller can retry.
    pub fn refresh<R: FractalRenderer>(
        &mut self,
        renderer: &R,
        paths: &ArtifactPaths,
    ) -> Result<Option<PathBuf>, R::Error> {
        let mode = self.state.mode;
        if !self.is_stale(mode) {
            return Ok(None);
        }
        let request = self.state.render_request(mode, paths);
        match renderer.render(&request) {
            Ok(()) => {
                info!(%mode, path = %request.out_path.display(), "Artifact refreshed");
                self.mark_valid(mode, request.out_path.clone());
                Ok(Some(request.out_path))
            }
            Err(e) => {
                warn!(%mode, "Render failed, slot stays stale: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const EPSILON: f64 = 1e-9;

    fn controller() -> InteractionController {
        InteractionController::new(AppState::with_defaults(
            Viewport::home_view(1920, 1080).unwrap(),
        ))
    }

    fn both_valid(ctl: &mut InteractionController) {
        ctl.mark_valid(Mode::Mandelbrot, "m.png");
        ctl.mark_valid(Mode::Julia, "j.png");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("renderer refused")]
    struct Refused;

    /// Records requests and succeeds or fails on demand.
    struct FakeRenderer {
        fail: bool,
        seen: RefCell<Vec<RenderRequest>>,
    }

    impl FractalRenderer for FakeRenderer {
        type Error = Refused;

        fn render(&self, request: &RenderRequest) -> Result<(), Refused> {
            self.seen.borrow_mut().push(request.clone());
            if self.fail {
                Err(Refused)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn app_state_rejects_bad_settings() {
        let vp = Viewport::home_view(10, 10).unwrap();
        let bad_power = RenderSettings {
            iteration_budget: 10,
            power: 0,
        };
        assert!(AppState::new(vp, JuliaParameter::default(), bad_power, 1.25).is_err());
        let ok = RenderSettings::default();
        assert!(AppState::new(vp, JuliaParameter::default(), ok, 0.0).is_err());
        assert!(AppState::new(vp, JuliaParameter::default(), ok, -2.0).is_err());
        assert!(AppState::new(vp, JuliaParameter::default(), ok, 2.0).is_ok());
    }

    #[test]
    fn wheel_forward_zooms_in_and_invalidates_both() {
        let mut ctl = controller();
        both_valid(&mut ctl);
        let delta = ctl.on_event(Event::WheelForward { x: 960, y: 540 }).unwrap();
        assert!(delta.mandelbrot_invalidated && delta.julia_invalidated);
        assert_eq!(delta.needs_render, Some(Mode::Mandelbrot));
        let w = ctl.current_viewport().bounds().width();
        assert!((w - 2.0 * 2.1333 * 0.8).abs() < EPSILON);
        assert!(ctl.is_stale(Mode::Mandelbrot) && ctl.is_stale(Mode::Julia));
    }

    #[test]
    fn wheel_backward_zooms_out() {
        let mut ctl = controller();
        ctl.on_event(Event::WheelBackward { x: 0, y: 0 }).unwrap();
        let b = ctl.current_viewport().bounds();
        assert!((b.width() - 2.0 * 2.1333 * 1.25).abs() < EPSILON);
        assert!((b.center().re + 2.1333).abs() < EPSILON);
        assert!((b.center().im - 1.2).abs() < EPSILON);
    }

    #[test]
    fn left_click_pans() {
        let mut ctl = controller();
        ctl.on_event(Event::WheelForward { x: 960, y: 540 }).unwrap();
        both_valid(&mut ctl);
        let delta = ctl.on_event(Event::LeftClick { x: 1200, y: 400 }).unwrap();
        assert!(delta.mandelbrot_invalidated);
        assert!(delta.julia_invalidated);
        assert!(!delta.mode_changed);
        assert!(ctl.current_viewport().bounds().center().re > 0.0);
        assert!(ctl.current_viewport().bounds().center().im > 0.0);
    }

    #[test]
    fn right_click_selects_parameter_and_enters_julia() {
        let mut ctl = controller();
        both_valid(&mut ctl);
        let delta = ctl.on_event(Event::RightClick { x: 960, y: 540 }).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Julia);
        assert!(delta.mode_changed);
        assert!(delta.julia_invalidated);
        assert!(!delta.mandelbrot_invalidated);
        assert_eq!(delta.needs_render, Some(Mode::Julia));
        let c = ctl.state().julia_parameter().c();
        assert!(c.re.abs() < EPSILON && c.im.abs() < EPSILON);
        assert!(!ctl.is_stale(Mode::Mandelbrot));
    }

    #[test]
    fn right_click_on_same_parameter_keeps_julia_valid() {
        let mut ctl = controller();
        ctl.on_event(Event::RightClick { x: 960, y: 540 }).unwrap();
        ctl.on_event(Event::RightClick { x: 960, y: 540 }).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Mandelbrot);
        both_valid(&mut ctl);

        let delta = ctl.on_event(Event::RightClick { x: 960, y: 540 }).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Julia);
        assert!(!delta.julia_invalidated);
        assert_eq!(delta.needs_render, None);
        assert!(!ctl.is_stale(Mode::Julia));
    }

    #[test]
    fn right_click_in_julia_returns_without_changes() {
        let mut ctl = controller();
        ctl.on_event(Event::RightClick { x: 100, y: 100 }).unwrap();
        let param = ctl.state().julia_parameter();
        let vp = ctl.current_viewport();
        let delta = ctl.on_event(Event::RightClick { x: 5, y: 5 }).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Mandelbrot);
        assert!(!delta.mandelbrot_invalidated && !delta.julia_invalidated);
        assert_eq!(ctl.state().julia_parameter(), param);
        assert_eq!(ctl.current_viewport(), vp);
    }

    #[test]
    fn toggle_flips_mode_without_invalidating() {
        let mut ctl = controller();
        both_valid(&mut ctl);
        let delta = ctl.on_event(Event::ToggleMode).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Julia);
        assert_eq!(
            delta,
            StateDelta {
                mode_changed: true,
                ..StateDelta::default()
            }
        );
        ctl.on_event(Event::ToggleMode).unwrap();
        assert_eq!(ctl.current_mode(), Mode::Mandelbrot);
    }

    #[test]
    fn reset_restores_home_and_keeps_mode() {
        let mut ctl = controller();
        ctl.on_event(Event::ToggleMode).unwrap();
        ctl.on_event(Event::WheelForward { x: 10, y: 1000 }).unwrap();
        ctl.on_event(Event::LeftClick { x: 1500, y: 20 }).unwrap();
        both_valid(&mut ctl);
        let delta = ctl.on_event(Event::Reset).unwrap();
        assert!(ctl.current_viewport().is_home());
        assert_eq!(ctl.current_mode(), Mode::Julia);
        assert!(delta.mandelbrot_invalidated && delta.julia_invalidated);
        assert!(ctl.is_stale(Mode::Mandelbrot) && ctl.is_stale(Mode::Julia));
    }

    #[test]
    fn failed_zoom_leaves_state_untouched() {
        // A zoom so deep that the rectangle collapses below f64 resolution
        // around a point away from the origin.
        let vp = Viewport::home_view(1920, 1080).unwrap();
        let state =
            AppState::new(vp, JuliaParameter::default(), RenderSettings::default(), 1e300).unwrap();
        let mut ctl = InteractionController::new(state.clone());
        ctl.mark_valid(Mode::Mandelbrot, "m.png");
        let before = ctl.state().clone();

        let err = ctl.on_event(Event::WheelForward { x: 1920, y: 1080 }).unwrap_err();
        assert!(matches!(err, CoreError::InvalidViewport { .. }));
        assert_eq!(ctl.state(), &before);
        assert!(!ctl.is_stale(Mode::Mandelbrot));
    }

    #[test]
    fn refresh_renders_current_mode_once() {
        let mut ctl = controller();
        let paths = ArtifactPaths::in_dir("out");
        let renderer = FakeRenderer {
            fail: false,
            seen: RefCell::new(Vec::new()),
        };

        let path = ctl.refresh(&renderer, &paths).unwrap();
        assert_eq!(path, Some(PathBuf::from("out/mandel.png")));
        assert!(!ctl.is_stale(Mode::Mandelbrot));
        assert!(ctl.refresh(&renderer, &paths).unwrap().is_none());

        ctl.on_event(Event::RightClick { x: 960, y: 540 }).unwrap();
        ctl.refresh(&renderer, &paths).unwrap();
        let seen = renderer.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].parameter, None);
        assert_eq!(seen[1].mode, Mode::Julia);
        let c = seen[1].parameter.unwrap();
        assert!(c.re.abs() < EPSILON && c.im.abs() < EPSILON);
    }

    #[test]
    fn refresh_failure_leaves_slot_stale() {
        let mut ctl = controller();
        let renderer = FakeRenderer {
            fail: true,
            seen: RefCell::new(Vec::new()),
        };
        assert!(ctl
            .refresh(&renderer, &ArtifactPaths::in_dir("out"))
            .is_err());
        assert!(ctl.is_stale(Mode::Mandelbrot));
        assert!(ctl.state().cache().artifact(Mode::Mandelbrot).is_none());
    }

    #[test]
    fn render_request_carries_parameter_only_for_julia() {
        let mut ctl = controller();
        ctl.on_event(Event::RightClick { x: 0, y: 0 }).unwrap();
        let paths = ArtifactPaths::in_dir(".");
        let state = ctl.state();
        let m = state.render_request(Mode::Mandelbrot, &paths);
        let j = state.render_request(Mode::Julia, &paths);
        assert!(m.parameter.is_none());
        let c = j.parameter.unwrap();
        assert!((c.re - -2.1333).abs() < EPSILON && (c.im - 1.2).abs() < EPSILON);
        assert_eq!(j.bounds(), ctl.current_viewport().bounds());
    }
}
