use fractoscope_core::{Complex, RenderSettings};

/// `|z|² > ESCAPE_RADIUS_SQ` means the orbit has escaped (`|z| > 2`).
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Iterate `z ← z^power + c` from `z0`.
///
/// Returns the step at which the orbit escaped, or `budget` if it never did.
#[inline]
pub fn escape_time(z0: Complex, c: Complex, power: u32, budget: u32) -> u32 {
    let mut z = z0;
    for n in 0..budget {
        z = z.powu(power) + c;
        if z.norm_sq() > ESCAPE_RADIUS_SQ {
            return n;
        }
    }
    budget
}

/// An escape-time fractal evaluated at single points of the plane.
///
/// Renderers are generic over `F: Fractal` so the inner loop is statically
/// dispatched.
pub trait Fractal {
    /// Escape step for `point`, in `0..=budget()`.
    fn iterate(&self, point: Complex) -> u32;

    fn budget(&self) -> u32;
}

/// `z₀ = 0`, `c = point`.
#[derive(Debug, Clone, Copy)]
pub struct Mandelbrot {
    settings: RenderSettings,
}

impl Mandelbrot {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }
}

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, point: Complex) -> u32 {
        escape_time(
            Complex::ZERO,
            point,
            self.settings.power,
            self.settings.iteration_budget,
        )
    }

    fn budget(&self) -> u32 {
        self.settings.iteration_budget
    }
}

/// `z₀ = point`, `c` fixed.
#[derive(Debug, Clone, Copy)]
pub struct Julia {
    c: Complex,
    settings: RenderSettings,
}

impl Julia {
    pub fn new(c: Complex, settings: RenderSettings) -> Self {
        Self { c, settings }
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, point: Complex) -> u32 {
        escape_time(
            point,
            self.c,
            self.settings.power,
            self.settings.iteration_budget,
        )
    }

    fn budget(&self) -> u32 {
        self.settings.iteration_budget
    }
}
