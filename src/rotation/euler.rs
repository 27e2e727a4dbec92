//! Euler angles in the convention used by the pose error metric.
//!
//! A triple `(e1, e2, e3)` stands for
//!
//! ```text
//! R = Rx(-e1) * Ry(-e2) * Rz(-e3)
//! ```
//!
//! i.e. the transpose of the intrinsic Z-Y-X product `Rz(e3) * Ry(e2) * Rx(e1)`.
//! `e2` lives in `[-pi/2, pi/2]`, `e1` and `e3` in `(-pi, pi]`.
//!
//! At gimbal lock (`e2 = +-pi/2`) only `e1 - e3` (or `e1 + e3`) is observable.
//! The decomposition then fixes `e3 = 0` and puts the whole in-plane angle in
//! `e1`, so the returned triple always rebuilds the input matrix.

use super::at;
use super::expmap::expmap_to_matrix;
use glam::{DMat3, DVec3};
use std::f64::consts::FRAC_PI_2;

/// `|R[0][2]|` closer to 1 than this is treated as gimbal lock.
const GIMBAL_EPSILON: f64 = 1e-14;

pub fn matrix_to_euler(m: DMat3) -> DVec3 {
    let r02 = at(&m, 0, 2);

    if r02 >= 1.0 - GIMBAL_EPSILON {
        let e1 = (-at(&m, 1, 0)).atan2(at(&m, 1, 1));
        return DVec3::new(e1, -FRAC_PI_2, 0.0);
    }
    if r02 <= -1.0 + GIMBAL_EPSILON {
        let e1 = at(&m, 1, 0).atan2(at(&m, 1, 1));
        return DVec3::new(e1, FRAC_PI_2, 0.0);
    }

    let e2 = -r02.asin();
    let e1 = at(&m, 1, 2).atan2(at(&m, 2, 2));
    let e3 = at(&m, 0, 1).atan2(at(&m, 0, 0));
    DVec3::new(e1, e2, e3)
}

pub fn euler_to_matrix(e: DVec3) -> DMat3 {
    DMat3::from_rotation_x(-e.x) * DMat3::from_rotation_y(-e.y) * DMat3::from_rotation_z(-e.z)
}

/// Shortcut for the expmap -> matrix -> Euler chain applied per joint.
pub fn expmap_to_euler(r: DVec3) -> DVec3 {
    matrix_to_euler(expmap_to_matrix(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::PI;

    fn frobenius(a: DMat3, b: DMat3) -> f64 {
        (a - b)
            .to_cols_array()
            .iter()
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn identity_has_zero_angles() {
        assert_eq!(matrix_to_euler(DMat3::IDENTITY), DVec3::ZERO);
    }

    #[test]
    fn recovers_angles_away_from_lock() {
        let e = DVec3::new(0.4, -0.9, 2.1);
        let back = matrix_to_euler(euler_to_matrix(e));
        assert_abs_diff_eq!(back.x, e.x, epsilon = 1e-10);
        assert_abs_diff_eq!(back.y, e.y, epsilon = 1e-10);
        assert_abs_diff_eq!(back.z, e.z, epsilon = 1e-10);
    }

    #[test]
    fn transpose_of_intrinsic_zyx() {
        let e = DVec3::new(0.3, 0.2, -0.5);
        let zyx =
            DMat3::from_rotation_z(e.z) * DMat3::from_rotation_y(e.y) * DMat3::from_rotation_x(e.x);
        assert!(frobenius(euler_to_matrix(e), zyx.transpose()) < 1e-12);
    }

    #[test]
    fn random_matrices_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let r = DVec3::new(
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
            );
            let m = expmap_to_matrix(r);
            let back = euler_to_matrix(matrix_to_euler(m));
            assert!(frobenius(m, back) < 1e-6, "round trip failed for {r:?}");
        }
    }

    #[test]
    fn gimbal_lock_positive_middle_axis() {
        for (e1, e3) in [(0.7, 0.0), (0.7, 0.4), (-2.5, 1.9)] {
            let m = euler_to_matrix(DVec3::new(e1, FRAC_PI_2, e3));
            let e = matrix_to_euler(m);
            assert_abs_diff_eq!(e.y, FRAC_PI_2, epsilon = 1e-12);
            assert_eq!(e.z, 0.0);
            assert!(frobenius(m, euler_to_matrix(e)) < 1e-6);
        }
    }

    #[test]
    fn gimbal_lock_negative_middle_axis() {
        for (e1, e3) in [(0.7, 0.0), (1.2, -0.3), (3.0, 2.0)] {
            let m = euler_to_matrix(DVec3::new(e1, -FRAC_PI_2, e3));
            let e = matrix_to_euler(m);
            assert_abs_diff_eq!(e.y, -FRAC_PI_2, epsilon = 1e-12);
            assert_eq!(e.z, 0.0);
            assert!(frobenius(m, euler_to_matrix(e)) < 1e-6);
        }
    }

    #[test]
    fn gimbal_lock_is_deterministic() {
        let m = euler_to_matrix(DVec3::new(0.25, FRAC_PI_2, -0.5));
        assert_eq!(matrix_to_euler(m), matrix_to_euler(m));
    }

    #[test]
    fn expmap_shortcut_matches_chain() {
        let r = DVec3::new(0.1, 0.5, -0.2);
        assert_eq!(expmap_to_euler(r), matrix_to_euler(expmap_to_matrix(r)));
    }
}
