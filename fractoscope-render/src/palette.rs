/// Lowest channel value used for escaped points, so no escaped pixel is black.
const CHANNEL_FLOOR: u8 = 55;
const CHANNEL_SPAN: u8 = 255 - CHANNEL_FLOOR;

pub const INTERIOR: [u8; 3] = [0, 0, 0];

/// Map an escape fraction `ratio ∈ [0, 1]` to a blue → green → red hue.
///
/// The ratio is square-rooted first so the many fast-escaping points near
/// the set's exterior still spread across the gradient. Out-of-range inputs
/// are clamped.
pub fn hue(ratio: f64) -> [u8; 3] {
    let ratio = ratio.clamp(0.0, 1.0).sqrt();
    let ramp = |t: f64| CHANNEL_FLOOR + (CHANNEL_SPAN as f64 * t + 0.5) as u8;

    if ratio < 0.5 {
        let t = ratio * 2.0;
        [CHANNEL_FLOOR, ramp(t), ramp(1.0 - t)]
    } else {
        let t = (1.0 - ratio) * 2.0;
        [ramp(1.0 - t), ramp(t), CHANNEL_FLOOR]
    }
}

/// Color for an escape step. `steps == budget` means the point never escaped.
#[inline]
pub fn color_for(steps: u32, budget: u32) -> [u8; 3] {
    if steps >= budget {
        INTERIOR
    } else {
        hue(steps as f64 / budget as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_black() {
        assert_eq!(color_for(100, 100), INTERIOR);
    }

    #[test]
    fn escaped_is_never_black() {
        for steps in 0..100 {
            let c = color_for(steps, 100);
            assert_ne!(c, INTERIOR);
            assert!(c.iter().all(|&ch| ch >= CHANNEL_FLOOR));
        }
    }

    #[test]
    fn gradient_endpoints() {
        assert_eq!(hue(0.0), [55, 55, 255]);
        assert_eq!(hue(0.25), [55, 255, 55]);
        assert_eq!(hue(1.0), [255, 55, 55]);
    }

    #[test]
    fn out_of_range_ratio_is_clamped() {
        assert_eq!(hue(-3.0), hue(0.0));
        assert_eq!(hue(7.0), hue(1.0));
    }
}
