use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::viewport::Viewport;

/// The constant `c` added at each step of the Julia recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JuliaParameter {
    c: Complex,
}

impl JuliaParameter {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }

    /// Startup constant: `c = 0.25 + 0i`, the cusp of the main cardioid.
    pub fn default_c() -> Complex {
        Complex::new(0.25, 0.0)
    }

    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for JuliaParameter {
    fn default() -> Self {
        Self::new(Self::default_c())
    }
}

impl std::fmt::Display for JuliaParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c = {}", self.c)
    }
}

/// Holds the current Julia constant and derives new ones from clicks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JuliaParameterSelector {
    current: JuliaParameter,
}

impl JuliaParameterSelector {
    pub fn new(initial: JuliaParameter) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> JuliaParameter {
        self.current
    }

    /// The constant under pixel `(px, py)` of `viewport`.
    ///
    /// Any point of the plane is a legal constant, so nothing is clamped.
    pub fn select(&self, px: i64, py: i64, viewport: &Viewport) -> JuliaParameter {
        JuliaParameter::new(viewport.pixel_to_complex(px, py))
    }

    /// Store `param`, returning `true` if it differs from the current one.
    pub fn replace(&mut self, param: JuliaParameter) -> bool {
        if param == self.current {
            return false;
        }
        debug!(old = %self.current, new = %param, "Julia parameter changed");
        self.current = param;
        true
    }
}
