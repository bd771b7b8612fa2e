// Model transforms: translation, scale and axis-angle rotation

use crate::mat::Matrix4;
use crate::vec::Vector3;

/// Adds `v` to the translation already encoded in `m`.
///
/// A matrix at `(1, 1, 1)` moved by `(2, 2, 2)` ends up at `(3, 3, 3)`.
pub fn translate_relative(m: &mut Matrix4, v: Vector3) {
    m[3][0] += v.x;
    m[3][1] += v.y;
    m[3][2] += v.z;
}

/// Overwrites the translation of `m` with `v`, whatever it was before.
pub fn translate_absolute(m: &mut Matrix4, v: Vector3) {
    m[3][0] = v.x;
    m[3][1] = v.y;
    m[3][2] = v.z;
}

/// Multiplies the x, y and z diagonal entries of `m` by the components of `v`.
/// Translation and the bottom row are left alone.
pub fn scale(m: &mut Matrix4, v: Vector3) {
    m[0][0] *= v.x;
    m[1][1] *= v.y;
    m[2][2] *= v.z;
}

/// Overwrites `m` with a rotation of `angle` radians about `axis`
/// (right-hand rule).
///
/// The axis is normalized locally; it must not be the zero vector.
pub fn rotation_matrix(m: &mut Matrix4, axis: Vector3, angle: f32) {
    let Vector3 { x, y, z } = axis.unit();
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    *m = Matrix4::from_cols([
        [t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0],
        [t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0],
        [t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
}

/// Rotates `m` about `axis` by `angle` radians, on top of whatever `m`
/// already does (`m = R * m`).
pub fn rotate(m: &mut Matrix4, axis: Vector3, angle: f32) {
    let mut rotation = Matrix4::IDENTITY;
    rotation_matrix(&mut rotation, axis, angle);
    *m = rotation * *m;
}

/// Position, axis-angle rotation and scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub axis: Vector3,
    pub angle: f32,
    pub scale: Vector3,
}

impl Transform {
    /// Rotation is `angle` radians about `axis`. The axis need not be unit
    /// length, but it must be non-zero unless `angle` is 0.
    pub fn new(position: Vector3, axis: Vector3, angle: f32, scale: Vector3) -> Self {
        Self {
            position,
            axis,
            angle,
            scale,
        }
    }

    /// At the origin, unscaled, with a zero-angle turn about +y.
    pub fn identity() -> Self {
        Self {
            position: Vector3::ZERO,
            axis: Vector3::new(0.0, 1.0, 0.0),
            angle: 0.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Matrix4 {
        let mut m = Matrix4::IDENTITY;
        scale(&mut m, self.scale);
        if self.angle != 0.0 {
            rotate(&mut m, self.axis, self.angle);
        }
        translate_relative(&mut m, self.position);
        m
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translate_relative_accumulates() {
        let mut m = Matrix4::IDENTITY;
        translate_relative(&mut m, Vector3::new(1.0, 2.0, 1.0));
        translate_relative(&mut m, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(m.translation(), Vector3::new(2.0, 3.0, 2.0));
    }

    #[test]
    fn test_translate_absolute_overwrites() {
        let mut m = Matrix4::IDENTITY;
        translate_relative(&mut m, Vector3::new(5.0, 5.0, 5.0));
        translate_absolute(&mut m, Vector3::new(-1.0, 0.5, 2.0));
        assert_eq!(m.translation(), Vector3::new(-1.0, 0.5, 2.0));
    }

    #[test]
    fn test_scale_touches_only_diagonal() {
        let mut m = Matrix4::IDENTITY;
        translate_absolute(&mut m, Vector3::new(1.0, 2.0, 3.0));
        scale(&mut m, Vector3::new(4.0, 3.0, 2.0));
        assert_eq!(m.get(0, 0), 4.0);
        assert_eq!(m.get(1, 1), 3.0);
        assert_eq!(m.get(2, 2), 2.0);
        assert_eq!(m.get(3, 3), 1.0);
        assert_eq!(m.translation(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_right_hand_rule() {
        let mut m = Matrix4::ZERO;
        rotation_matrix(&mut m, Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let rotated = m.transform_vector(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn test_rotation_normalizes_axis_copy() {
        let axis = Vector3::new(0.0, 0.0, 5.0);
        let mut scaled = Matrix4::ZERO;
        let mut unit = Matrix4::ZERO;
        rotation_matrix(&mut scaled, axis, 0.3);
        rotation_matrix(&mut unit, Vector3::new(0.0, 0.0, 1.0), 0.3);
        assert_relative_eq!(scaled, unit, epsilon = 1e-6);
        assert_eq!(axis, Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_rotate_composes_on_the_left() {
        let axis = Vector3::new(0.0, 1.0, 0.0);
        let mut m = Matrix4::IDENTITY;
        translate_absolute(&mut m, Vector3::new(1.0, 0.0, 0.0));
        rotate(&mut m, axis, FRAC_PI_2);

        // Translation happens first, so the offset gets rotated too.
        let p = m.transform_point(Vector3::ZERO);
        assert_relative_eq!(p, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transform_identity() {
        assert_eq!(Transform::identity().matrix(), Matrix4::IDENTITY);
    }

    #[test]
    fn test_transform_zero_axis_without_angle() {
        let t = Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::ZERO,
            0.0,
            Vector3::new(2.0, 3.0, 4.0),
        );
        let m = t.matrix();
        assert!(m.data().iter().all(|v| v.is_finite()));

        let mut expected = Matrix4::IDENTITY;
        scale(&mut expected, Vector3::new(2.0, 3.0, 4.0));
        translate_absolute(&mut expected, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m, expected);
    }

    #[test]
    fn test_transform_matrix_order() {
        let t = Transform::new(
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::new(0.0, 0.0, 1.0),
            FRAC_PI_2,
            Vector3::new(2.0, 2.0, 2.0),
        );
        let p = t.matrix().transform_point(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vector3::new(0.0, 2.0, 3.0), epsilon = 1e-6);
    }
}
