use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Half-width of the home rectangle on the real axis.
pub const HOME_X_HALF_EXTENT: f64 = 2.1333;
/// Half-height of the home rectangle on the imaginary axis.
pub const HOME_Y_HALF_EXTENT: f64 = 1.2;

/// Pixel aspect of the home grid: `16·scale × 9·scale`.
pub const ASPECT_UNITS: (u32, u32) = (16, 9);

/// An axis-aligned rectangle of the complex plane.
///
/// Invariant (enforced by [`Bounds::new`]): all edges are finite,
/// `x_max > x_min` and `y_max > y_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// The rectangle shown at startup and restored by reset.
    pub const HOME: Self = Self {
        x_min: -HOME_X_HALF_EXTENT,
        x_max: HOME_X_HALF_EXTENT,
        y_min: -HOME_Y_HALF_EXTENT,
        y_max: HOME_Y_HALF_EXTENT,
    };

    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> crate::Result<Self> {
        let edges = [x_min, x_max, y_min, y_max];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("edges must be finite, got x=({x_min}, {x_max}) y=({y_min}, {y_max})"),
            });
        }
        if x_max <= x_min || y_max <= y_min {
            return Err(CoreError::InvalidViewport {
                reason: format!("rectangle is empty or inverted: x=({x_min}, {x_max}) y=({y_min}, {y_max})"),
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Complex {
        Complex::new(
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        )
    }

    /// `true` if `other` lies entirely inside (or on the edge of) `self`.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x_min >= self.x_min
            && other.x_max <= self.x_max
            && other.y_min >= self.y_min
            && other.y_max <= self.y_max
    }

    /// Rectangle of `width × height` centred on `center`, translated so each
    /// axis sits inside `outer`.
    ///
    /// Each axis is handled on its own: a rectangle crossing the min edge is
    /// moved flush against it, otherwise one crossing the max edge is moved
    /// flush against that one. Sizes are taken as given rather than read back
    /// from the centred edges, so a rectangle no larger than `outer` ends up
    /// inside it exactly.
    fn placed_within(center: Complex, width: f64, height: f64, outer: &Bounds) -> Self {
        let (x_min, x_max) = fit_axis(center.re, width, outer.x_min, outer.x_max);
        let (y_min, y_max) = fit_axis(center.im, height, outer.y_min, outer.y_max);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

fn fit_axis(center: f64, span: f64, outer_min: f64, outer_max: f64) -> (f64, f64) {
    let min = center - 0.5 * span;
    let max = center + 0.5 * span;
    // An axis wider than `outer` keeps its full span.
    let fits = span <= outer_max - outer_min;
    if min < outer_min {
        let far = outer_min + span;
        (outer_min, if fits { far.min(outer_max) } else { far })
    } else if max > outer_max {
        let far = outer_max - span;
        (if fits { far.max(outer_min) } else { far }, outer_max)
    } else {
        (min, max)
    }
}

/// The rectangle of the complex plane currently mapped onto a fixed pixel grid.
///
/// Viewports are values: [`zoom`](Self::zoom), [`pan`](Self::pan) and
/// [`reset`](Self::reset) return a new viewport and never mutate `self`.
/// The pixel grid and the home rectangle captured at construction carry
/// over unchanged to every derived viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    bounds: Bounds,
    home: Bounds,
}

impl Viewport {
    /// Create a viewport whose home rectangle is `bounds`.
    pub fn new(width: u32, height: u32, bounds: Bounds) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        let bounds = Bounds::new(bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max)?;
        Ok(Self {
            width,
            height,
            bounds,
            home: bounds,
        })
    }

    /// The default home view on a `width × height` grid.
    pub fn home_view(width: u32, height: u32) -> crate::Result<Self> {
        Self::new(width, height, Bounds::HOME)
    }

    /// The default home view on a `16·scale × 9·scale` grid.
    ///
    /// A scale of 120 gives 1920×1080, 80 gives 1280×720.
    pub fn from_pixel_scale(scale: u32) -> crate::Result<Self> {
        let (ux, uy) = ASPECT_UNITS;
        match (ux.checked_mul(scale), uy.checked_mul(scale)) {
            (Some(w), Some(h)) => Self::home_view(w, h),
            _ => Err(CoreError::InvalidViewport {
                reason: format!("pixel scale {scale} overflows the pixel grid"),
            }),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The currently visible rectangle.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The rectangle captured at construction.
    #[inline]
    pub fn home(&self) -> Bounds {
        self.home
    }

    pub fn is_home(&self) -> bool {
        self.bounds == self.home
    }

    /// Map a pixel to a point on the complex plane.
    ///
    /// Pixel row 0 is the top of the grid and the imaginary axis grows
    /// upward, hence the vertical flip. Out-of-grid pixels are extrapolated.
    #[inline]
    pub fn pixel_to_complex(&self, px: i64, py: i64) -> Complex {
        self.subpixel_to_complex(px as f64, py as f64)
    }

    /// Same affine map as [`pixel_to_complex`](Self::pixel_to_complex) for
    /// fractional pixel positions.
    #[inline]
    pub fn subpixel_to_complex(&self, px: f64, py: f64) -> Complex {
        let b = &self.bounds;
        let w = self.width as f64;
        let h = self.height as f64;
        Complex::new(
            b.x_min + b.width() * px / w,
            b.y_min + b.height() * (h - py) / h,
        )
    }

    /// Scale the rectangle by `factor` around `center`.
    ///
    /// Zooming out (`factor >= 1`) is unconstrained. Zooming in keeps the
    /// result inside the current rectangle by translating it, so the size
    /// is always exactly `factor` times the old one.
    pub fn zoom(&self, center: Complex, factor: f64) -> crate::Result<Self> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(CoreError::InvalidZoomFactor(factor));
        }
        check_point(center)?;

        let width = self.bounds.width() * factor;
        let height = self.bounds.height() * factor;
        let bounds = if factor >= 1.0 {
            Bounds {
                x_min: center.re - 0.5 * width,
                x_max: center.re + 0.5 * width,
                y_min: center.im - 0.5 * height,
                y_max: center.im + 0.5 * height,
            }
        } else {
            Bounds::placed_within(center, width, height, &self.bounds)
        };
        self.with_bounds(bounds)
    }

    /// Re-centre on `to` at the same size, kept inside the home rectangle.
    pub fn pan(&self, to: Complex) -> crate::Result<Self> {
        check_point(to)?;
        let bounds =
            Bounds::placed_within(to, self.bounds.width(), self.bounds.height(), &self.home);
        self.with_bounds(bounds)
    }

    /// The home rectangle on the same pixel grid.
    pub fn reset(&self) -> Self {
        Self {
            bounds: self.home,
            ..*self
        }
    }

    fn with_bounds(&self, bounds: Bounds) -> crate::Result<Self> {
        let bounds = Bounds::new(bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max)?;
        Ok(Self { bounds, ..*self })
    }
}

fn check_point(p: Complex) -> crate::Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidViewport {
            reason: format!("target point must be finite, got {p}"),
        })
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.bounds;
        write!(
            f,
            "({}, {}): x=({}, {}) y=({}, {})",
            self.width, self.height, b.x_min, b.x_max, b.y_min, b.y_max
        )
    }
}
