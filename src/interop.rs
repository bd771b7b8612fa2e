// Conversions to and from glam
//
// glam stores Mat4 column-major as well, so both directions copy the sixteen
// floats straight across.

use glam::{Mat4, Vec3};

use crate::mat::Matrix4;
use crate::vec::Vector3;

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Self {
        Mat4::from_cols_array(m.data())
    }
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Self {
        Matrix4::from_cols_array(m.to_cols_array())
    }
}
