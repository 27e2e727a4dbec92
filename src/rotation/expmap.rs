use super::at;
use glam::{DMat3, DVec3};

/// Angles below this are treated as no rotation at all.
pub const SMALL_ANGLE: f64 = 1e-6;

const AXIS_SIGN_NOISE: f64 = 1e-12;

/// Skew-symmetric cross-product matrix, `skew(a) * v == a.cross(v)`.
fn skew(a: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, a.z, -a.y),
        DVec3::new(-a.z, 0.0, a.x),
        DVec3::new(a.y, -a.x, 0.0),
    )
}

/// Exponential map to rotation matrix (Rodrigues' formula).
///
/// `r` rotates by `|r|` radians about `r / |r|`. Rotations smaller than
/// [`SMALL_ANGLE`] have no well-defined axis and map to the identity.
pub fn expmap_to_matrix(r: DVec3) -> DMat3 {
    let theta = r.length();
    if theta < SMALL_ANGLE {
        return DMat3::IDENTITY;
    }

    let k = skew(r / theta);
    DMat3::IDENTITY + k * theta.sin() + (k * k) * (1.0 - theta.cos())
}

/// Rotation matrix to exponential map, with angle in `[0, pi]`.
///
/// The angle comes from `atan2(sin, cos)` where `cos = (trace - 1) / 2` and
/// `sin` is half the norm of the skew part, which stays well conditioned at
/// both ends of the range. Below `pi / 2` the axis is read off the skew part;
/// above it, from the symmetric part `(R + R^T) / 2 - cos I = (1 - cos) a a^T`,
/// signed to agree with the skew part.
///
/// At exactly `pi` the rotation is the same for `a` and `-a`; the axis whose
/// first non-zero component is positive is returned.
pub fn matrix_to_expmap(m: DMat3) -> DVec3 {
    let w = DVec3::new(
        at(&m, 2, 1) - at(&m, 1, 2),
        at(&m, 0, 2) - at(&m, 2, 0),
        at(&m, 1, 0) - at(&m, 0, 1),
    );
    let trace = at(&m, 0, 0) + at(&m, 1, 1) + at(&m, 2, 2);
    let cos_theta = ((trace - 1.0) * 0.5).clamp(-1.0, 1.0);
    let sin_theta = 0.5 * w.length();
    let theta = sin_theta.atan2(cos_theta);

    if theta < SMALL_ANGLE {
        return DVec3::ZERO;
    }

    if cos_theta >= 0.0 {
        return w * (theta / (2.0 * sin_theta));
    }

    let outer = ((m + m.transpose()) * 0.5 - DMat3::IDENTITY * cos_theta)
        * (1.0 / (1.0 - cos_theta));
    let diag = DVec3::new(at(&outer, 0, 0), at(&outer, 1, 1), at(&outer, 2, 2));
    let i = if diag.x >= diag.y && diag.x >= diag.z {
        0
    } else if diag.y >= diag.z {
        1
    } else {
        2
    };
    let mut axis = (outer.col(i) / diag[i].max(f64::MIN_POSITIVE).sqrt()).normalize();

    // The skew part only carries sign information while it is above noise.
    let along = w.dot(axis);
    if along.abs() < AXIS_SIGN_NOISE {
        axis = canonical_sign(axis);
    } else if along < 0.0 {
        axis = -axis;
    }

    axis * theta
}

fn canonical_sign(axis: DVec3) -> DVec3 {
    let first = [axis.x, axis.y, axis.z]
        .into_iter()
        .find(|c| c.abs() > AXIS_SIGN_NOISE)
        .unwrap_or(0.0);
    if first < 0.0 {
        -axis
    } else {
        axis
    }
}
