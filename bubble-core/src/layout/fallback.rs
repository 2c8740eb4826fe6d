// Fallback placement.
//
// Used once the spiral search for a circle has reached its distance limit
// without a free slot. The circle is put on the last explored ray, pulled
// toward the center by `pull`, and may overlap its neighbours. The search is
// never retried or widened: the distance limit is what bounds the run time.

use super::PointF;

/// Position for a circle whose spiral search ended at (`angle`, `dist`).
pub fn fallback_position(angle: f64, dist: f64, center: PointF, pull: f64) -> PointF {
    let d = dist * pull;
    PointF {
        x: center.x + angle.cos() * d,
        y: center.y + angle.sin() * d,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const CENTER: PointF = PointF { x: 150.0, y: 150.0 };

    #[test]
    fn test_pulls_toward_center() {
        let p = fallback_position(0.0, 100.0, CENTER, 0.7);
        assert!((p.x - 220.0).abs() < 1e-9);
        assert!((p.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_follows_the_ray() {
        let p = fallback_position(FRAC_PI_2, 50.0, CENTER, 0.7);
        assert!((p.x - 150.0).abs() < 1e-9);
        assert!((p.y - 185.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_lands_on_center() {
        assert_eq!(fallback_position(1.3, 0.0, CENTER, 0.7), CENTER);
    }
}
