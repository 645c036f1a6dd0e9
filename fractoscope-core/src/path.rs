//! Paths through the parameter plane, used to render a series of Julia sets
//! whose constant moves a little from one frame to the next.
//!
//! Both paths are laid out in polar coordinates around the cusp-side anchor
//! of the Mandelbrot set's main cardioid, whose boundary is
//! `r(θ) = ½·(1 − cos θ)` around `(¼, 0)`.

use std::f64::consts::TAU;

use crate::complex::Complex;
use crate::error::CoreError;

/// Pole of the polar frame the main cardioid is described in.
pub const CARDIOID_ANCHOR: Complex = Complex { re: 0.25, im: 0.0 };

/// Distance from [`CARDIOID_ANCHOR`] to the main cardioid at `angle` radians.
pub fn cardioid_radius(angle: f64) -> f64 {
    0.5 * (1.0 - angle.cos())
}

/// A sequence of Julia constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JuliaPath {
    /// `slices` constants evenly spaced by angle along the main cardioid,
    /// starting at `offset` and sweeping `sweep` radians. A non-zero
    /// `derailment` moves every point that far off the boundary, outward
    /// when positive.
    Cardioid {
        slices: u32,
        offset: f64,
        sweep: f64,
        derailment: f64,
    },
    /// `slices` constants on a ray that leaves the cardioid boundary at
    /// `angle` and runs `length` further out; both ends are included.
    Radial { angle: f64, length: f64, slices: u32 },
}

impl JuliaPath {
    /// One full turn around the cardioid.
    pub fn cardioid(slices: u32, derailment: f64) -> Self {
        Self::Cardioid {
            slices,
            offset: 0.0,
            sweep: TAU,
            derailment,
        }
    }

    pub fn radial(angle: f64, length: f64, slices: u32) -> Self {
        Self::Radial {
            angle,
            length,
            slices,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cardioid { .. } => "cardioid",
            Self::Radial { .. } => "radial",
        }
    }

    pub fn slices(&self) -> u32 {
        match *self {
            Self::Cardioid { slices, .. } | Self::Radial { slices, .. } => slices,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.slices() == 0 {
            return Err(CoreError::InvalidParameters {
                reason: "a series needs at least one slice".into(),
            });
        }
        let finite = match *self {
            Self::Cardioid {
                offset,
                sweep,
                derailment,
                ..
            } => [offset, sweep, derailment].iter().all(|v| v.is_finite()),
            Self::Radial { angle, length, .. } => angle.is_finite() && length.is_finite(),
        };
        if !finite {
            return Err(CoreError::InvalidParameters {
                reason: format!("{} path has a non-finite component: {self:?}", self.label()),
            });
        }
        Ok(())
    }

    /// The constants along the path, in order.
    pub fn points(&self) -> crate::Result<Vec<Complex>> {
        self.validate()?;
        let points = match *self {
            Self::Cardioid {
                slices,
                offset,
                sweep,
                derailment,
            } => (0..slices)
                .map(|i| {
                    let a = (offset + sweep * i as f64 / slices as f64).rem_euclid(TAU);
                    around_anchor(cardioid_radius(a) + derailment, a)
                })
                .collect(),
            Self::Radial {
                angle,
                length,
                slices,
            } => {
                let start = cardioid_radius(angle);
                let steps = (slices - 1).max(1) as f64;
                (0..slices)
                    .map(|i| around_anchor(start + length * i as f64 / steps, angle))
                    .collect()
            }
        };
        Ok(points)
    }
}

fn around_anchor(r: f64, angle: f64) -> Complex {
    Complex::new(
        CARDIOID_ANCHOR.re + r * angle.cos(),
        CARDIOID_ANCHOR.im + r * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    fn close(a: Complex, b: Complex) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    fn distance_from_anchor(p: Complex) -> f64 {
        (p - CARDIOID_ANCHOR).norm_sq().sqrt()
    }

    #[test]
    fn quarter_turns_hit_known_cardioid_points() {
        let pts = JuliaPath::cardioid(4, 0.0).points().unwrap();
        assert_eq!(pts.len(), 4);
        assert!(close(pts[0], Complex::new(0.25, 0.0)), "cusp");
        assert!(close(pts[1], Complex::new(0.25, 0.5)));
        assert!(close(pts[2], Complex::new(-0.75, 0.0)), "period-2 junction");
        assert!(close(pts[3], Complex::new(0.25, -0.5)));
    }

    #[test]
    fn cardioid_points_lie_on_the_boundary() {
        // The boundary is also `e^{iθ}/2 − e^{2iθ}/4`.
        for p in JuliaPath::cardioid(36, 0.0).points().unwrap() {
            let r = distance_from_anchor(p);
            let a = (p.im).atan2(p.re - CARDIOID_ANCHOR.re);
            assert!((r - cardioid_radius(a)).abs() < EPSILON);
        }
        let t: f64 = 1.1;
        let param = Complex::new(
            0.5 * t.cos() - 0.25 * (2.0 * t).cos(),
            0.5 * t.sin() - 0.25 * (2.0 * t).sin(),
        );
        let r = distance_from_anchor(param);
        let a = param.im.atan2(param.re - CARDIOID_ANCHOR.re);
        assert!((r - cardioid_radius(a)).abs() < EPSILON);
    }

    #[test]
    fn derailment_pushes_points_outward() {
        let on = JuliaPath::cardioid(8, 0.0).points().unwrap();
        let off = JuliaPath::cardioid(8, 0.002).points().unwrap();
        for (a, b) in on.iter().zip(&off).skip(1) {
            let gap = distance_from_anchor(*b) - distance_from_anchor(*a);
            assert!((gap - 0.002).abs() < EPSILON);
        }
    }

    #[test]
    fn offset_wraps_around_the_turn() {
        let path = JuliaPath::Cardioid {
            slices: 2,
            offset: -FRAC_PI_2,
            sweep: PI,
            derailment: 0.0,
        };
        let pts = path.points().unwrap();
        assert!(close(pts[0], Complex::new(0.25, -0.5)));
        assert!(close(pts[1], Complex::new(0.25, 0.0)));
    }

    #[test]
    fn radial_path_starts_on_the_boundary_and_spans_its_length() {
        let pts = JuliaPath::radial(PI, 0.5, 3).points().unwrap();
        assert_eq!(pts.len(), 3);
        assert!(close(pts[0], Complex::new(-0.75, 0.0)));
        assert!(close(pts[1], Complex::new(-1.0, 0.0)));
        assert!(close(pts[2], Complex::new(-1.25, 0.0)));

        let single = JuliaPath::radial(FRAC_PI_2, 0.05, 1).points().unwrap();
        assert_eq!(single.len(), 1);
        assert!(close(single[0], Complex::new(0.25, 0.5)));
    }

    #[test]
    fn degenerate_paths_are_rejected() {
        assert!(matches!(
            JuliaPath::cardioid(0, 0.0).points(),
            Err(CoreError::InvalidParameters { .. })
        ));
        assert!(JuliaPath::cardioid(5, f64::NAN).points().is_err());
        assert!(JuliaPath::radial(f64::INFINITY, 0.1, 5).points().is_err());
        assert!(JuliaPath::radial(0.3, 0.1, 0).validate().is_err());
    }
}
