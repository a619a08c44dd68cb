//! Quaternion helpers shared by entities, cameras, and impulse vectors.

use glam::{Quat, Vec3};

/// Builds the half-angle quaternion for a rotation of `degrees` around a
/// cardinal `axis`: `sin(θ/2)` in the axis component, `cos(θ/2)` in `w`.
///
/// `axis` is expected to be one of the unit basis vectors.
pub fn axis_delta(axis: Vec3, degrees: f32) -> Quat {
    let half = degrees.to_radians() * 0.5;
    let (sin, cos) = half.sin_cos();
    Quat::from_xyzw(axis.x * sin, axis.y * sin, axis.z * sin, cos)
}

/// Rotates `current` by `degrees` around its local X axis (`current ⊗ delta`).
pub fn rotate_x(current: Quat, degrees: f32) -> Quat {
    current * axis_delta(Vec3::X, degrees)
}

/// Rotates `current` by `degrees` around its local Y axis (`current ⊗ delta`).
pub fn rotate_y(current: Quat, degrees: f32) -> Quat {
    current * axis_delta(Vec3::Y, degrees)
}

/// Rotates `current` by `degrees` around its local Z axis (`current ⊗ delta`).
pub fn rotate_z(current: Quat, degrees: f32) -> Quat {
    current * axis_delta(Vec3::Z, degrees)
}

/// Rotates `v` by `q` using the sandwich product `q ⊗ v ⊗ q⁻¹`, with `v`
/// treated as a pure-vector quaternion.
pub fn rotate_vector(v: Vec3, q: Quat) -> Vec3 {
    let len_sq = q.length_squared();
    if len_sq <= f32::EPSILON {
        return v;
    }
    let inverse = q.conjugate() / len_sq;
    let r = q * Quat::from_xyzw(v.x, v.y, v.z, 0.0) * inverse;
    Vec3::new(r.x, r.y, r.z)
}

/// Moves `location` along the rotated local X axis by `speed`.
pub fn move_x(rotation: Quat, location: Vec3, speed: f32) -> Vec3 {
    location + rotate_vector(Vec3::new(speed, 0.0, 0.0), rotation)
}

/// Moves `location` along the rotated local Y axis by `speed`.
pub fn move_y(rotation: Quat, location: Vec3, speed: f32) -> Vec3 {
    location + rotate_vector(Vec3::new(0.0, speed, 0.0), rotation)
}

/// Moves `location` along the rotated local Z axis by `speed`.
pub fn move_z(rotation: Quat, location: Vec3, speed: f32) -> Vec3 {
    location + rotate_vector(Vec3::new(0.0, 0.0, speed), rotation)
}

/// Restores unit norm. Degenerate (zero or non-finite) input collapses to identity.
pub fn renormalize(q: Quat) -> Quat {
    let len_sq = q.length_squared();
    if !len_sq.is_finite() || len_sq <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    q / len_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_identity_rotation_leaves_vector_unchanged() {
        let v = Vec3::new(3.5, -2.0, 11.0);
        assert_eq!(rotate_vector(v, Quat::IDENTITY), v);
    }

    #[test]
    fn test_rotate_then_inverse_round_trips() {
        let q = renormalize(rotate_z(rotate_y(rotate_x(Quat::IDENTITY, 33.0), -71.0), 12.5));
        let v = Vec3::new(1.0, 2.0, 3.0);
        let there = rotate_vector(v, q);
        let back = rotate_vector(there, q.inverse());
        assert!(approx(back, v), "round trip drifted: {back:?}");
    }

    #[test]
    fn test_half_angle_components() {
        let q = axis_delta(Vec3::Y, 90.0);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!((q.y - s).abs() < 1e-6);
        assert!((q.w - s).abs() < 1e-6);
        assert_eq!(q.x, 0.0);
        assert_eq!(q.z, 0.0);
    }

    #[test]
    fn test_yaw_90_turns_forward_into_positive_x() {
        let q = rotate_y(Quat::IDENTITY, 90.0);
        assert!(approx(rotate_vector(Vec3::Z, q), Vec3::X));
    }

    #[test]
    fn test_composition_is_local_frame() {
        // Yaw then pitch in the yawed frame: forward ends up pointing down.
        let q = rotate_x(rotate_y(Quat::IDENTITY, 90.0), 90.0);
        assert!(approx(rotate_vector(Vec3::Z, q), Vec3::NEG_Y));

        // The world-frame order would give +X instead.
        let world = axis_delta(Vec3::X, 90.0) * axis_delta(Vec3::Y, 90.0);
        assert!(approx(rotate_vector(Vec3::Z, world), Vec3::X));
    }

    #[test]
    fn test_matches_glam_rotation() {
        let q = renormalize(rotate_x(rotate_y(Quat::IDENTITY, 40.0), -15.0));
        let v = Vec3::new(-4.0, 0.5, 9.0);
        assert!(approx(rotate_vector(v, q), q * v));
    }

    #[test]
    fn test_move_helpers_follow_orientation() {
        let q = rotate_y(Quat::IDENTITY, 90.0);
        let start = Vec3::new(1.0, 1.0, 1.0);
        assert!(approx(move_z(q, start, 10.0), Vec3::new(11.0, 1.0, 1.0)));
        assert!(approx(move_x(q, start, 10.0), Vec3::new(1.0, 1.0, -9.0)));
        assert!(approx(move_y(q, start, -2.0), Vec3::new(1.0, -1.0, 1.0)));
    }

    #[test]
    fn test_renormalized_rotations_stay_unit() {
        let mut q = Quat::IDENTITY;
        for i in 0..10_000 {
            let amount = (i % 17) as f32 * 1.37 - 9.0;
            q = renormalize(rotate_x(q, amount));
            q = renormalize(rotate_y(q, amount * 0.5));
            q = renormalize(rotate_z(q, -amount));
            assert!((q.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unnormalized_drift_is_measurable_and_reproducible() {
        let run = || {
            let mut q = Quat::IDENTITY;
            for i in 0..200_000 {
                let amount = (i % 23) as f32 * 0.731 + 0.113;
                q = rotate_x(q, amount);
                q = rotate_y(q, -amount * 0.37);
                q = rotate_z(q, amount * 1.9);
            }
            q
        };
        let a = run();
        let b = run();
        assert_eq!(a.to_array(), b.to_array());
        let drift = (a.length() - 1.0).abs();
        assert!(drift > f32::EPSILON, "expected drift, got {drift}");
        assert!((renormalize(a).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_renormalize_degenerate_is_identity() {
        assert_eq!(renormalize(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)), Quat::IDENTITY);
        assert_eq!(renormalize(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0)), Quat::IDENTITY);
    }
}
