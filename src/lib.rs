// IntSar-3D math kernel
//
// A 3-vector, a column-major 4x4 matrix, and the transform and camera
// routines a renderer needs each frame. Everything here is plain value math;
// the flat float buffers it produces are uploaded as-is.

pub mod camera;
pub mod error;
pub mod interop;
pub mod mat;
pub mod transform;
pub mod vec;

pub use camera::{gen_orthographic_proj, gen_perspective_proj, lookat, Camera, Projection};
pub use error::{MathError, MathResult};
pub use mat::Matrix4;
pub use transform::{rotate, rotation_matrix, scale, translate_absolute, translate_relative, Transform};
pub use vec::{cross, dot, Vector3};

/// Converts degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
