//! Orbit-plane tilt.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed rotation of an orbital plane: first about X, then about Z (radians).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitTilt {
    pub x: f64,
    pub z: f64,
}

impl OrbitTilt {
    pub const NONE: OrbitTilt = OrbitTilt { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Random tilt of `min_deg..max_deg` around a random in-plane axis.
    pub fn random_banded<R: Rng + ?Sized>(rng: &mut R, min_deg: f64, max_deg: f64) -> Self {
        let angle = if max_deg > min_deg {
            rng.gen_range(min_deg..max_deg)
        } else {
            min_deg
        }
        .to_radians();
        let axis = rng.gen_range(0.0..TAU);
        Self {
            x: axis.sin() * angle,
            z: axis.cos() * angle,
        }
    }
}

/// Offset of a body at `angle` on a circle of radius `distance`, in a plane tilted by `tilt`.
///
/// X rotation is applied first, Z second. The order matters: swapping it gives a different
/// plane for any non-zero tilt.
pub fn tilted_offset(distance: f64, angle: f64, tilt: OrbitTilt) -> DVec3 {
    let base_x = angle.cos() * distance;
    let base_z = angle.sin() * distance;
    compose(base_x, base_z, tilt)
}

/// Apply `tilt` to a point `(base_x, 0, base_z)` of the untilted plane.
pub fn compose(base_x: f64, base_z: f64, tilt: OrbitTilt) -> DVec3 {
    let (sin_x, cos_x) = tilt.x.sin_cos();
    let (sin_z, cos_z) = tilt.z.sin_cos();

    let y1 = -base_z * sin_x;
    let z1 = base_z * cos_x;

    DVec3::new(
        base_x * cos_z - y1 * sin_z,
        base_x * sin_z + y1 * cos_z,
        z1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    #[test]
    fn zero_tilt_is_identity() {
        let p = compose(3.0, -4.0, OrbitTilt::NONE);
        assert_eq!(p, DVec3::new(3.0, 0.0, -4.0));
    }

    #[test]
    fn same_inputs_same_output() {
        let tilt = OrbitTilt::new(0.3, -0.2);
        assert_eq!(tilted_offset(6.0, 1.1, tilt), tilted_offset(6.0, 1.1, tilt));
    }

    #[test]
    fn quarter_turn_about_x_lifts_z_into_minus_y() {
        let p = compose(0.0, 5.0, OrbitTilt::new(FRAC_PI_2, 0.0));
        assert!((p - DVec3::new(0.0, -5.0, 0.0)).length() < EPS);
    }

    #[test]
    fn x_then_z_differs_from_z_then_x() {
        let tilt = OrbitTilt::new(0.5, 0.7);
        let p = compose(1.0, 1.0, tilt);

        // Z first, then X.
        let (sx, cx) = tilt.x.sin_cos();
        let (sz, cz) = tilt.z.sin_cos();
        let (x0, y0, z0) = (1.0 * cz, 1.0 * sz, 1.0);
        let other = DVec3::new(x0, y0 * cx - z0 * sx, y0 * sx + z0 * cx);

        assert!((p - other).length() > 1e-3);
    }

    #[test]
    fn tilt_preserves_orbit_radius() {
        let tilt = OrbitTilt::new(0.4, -0.35);
        for i in 0..16 {
            let angle = i as f64 * TAU / 16.0;
            let len = tilted_offset(8.0, angle, tilt).length();
            assert!((len - 8.0).abs() < 1e-9, "radius drifted to {len}");
        }
    }

    #[test]
    fn random_band_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let t = OrbitTilt::random_banded(&mut rng, 10.0, 30.0);
            let magnitude = (t.x * t.x + t.z * t.z).sqrt().to_degrees();
            assert!((10.0 - 1e-9..30.0).contains(&magnitude), "{magnitude}");
        }
    }
}
