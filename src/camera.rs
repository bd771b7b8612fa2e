// Projection and view matrices

use std::f32::consts::FRAC_PI_2;

use crate::mat::Matrix4;
use crate::vec::{cross, dot, Vector3};

/// Fills `a` with an OpenGL-style perspective projection.
///
/// The frustum extents are derived from the horizontal field of view:
/// `right = tan(fovx / 2) * near` and `top = right / aspect_ratio`.
/// Requires `far > near > 0` and `0 < fovx < PI`; nothing is validated.
pub fn gen_perspective_proj(a: &mut Matrix4, fovx: f32, aspect_ratio: f32, near: f32, far: f32) {
    let right = (fovx / 2.0).tan() * near;
    let left = -right;
    let top = right / aspect_ratio;
    let bottom = -top;

    *a = Matrix4::from_cols([
        [2.0 * near / (right - left), 0.0, 0.0, 0.0],
        [0.0, 2.0 * near / (top - bottom), 0.0, 0.0],
        [
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            -((far + near) / (far - near)),
            -1.0,
        ],
        [0.0, 0.0, -(2.0 * far * near / (far - near)), 0.0],
    ]);
}

/// Fills `a` with the orthographic projection of the box
/// `[left, right] x [bottom, top] x [near, far]` onto the clip cube.
pub fn gen_orthographic_proj(
    a: &mut Matrix4,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) {
    *a = Matrix4::from_cols([
        [2.0 / (right - left), 0.0, 0.0, 0.0],
        [0.0, 2.0 / (top - bottom), 0.0, 0.0],
        [0.0, 0.0, -2.0 / (far - near), 0.0],
        [
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            1.0,
        ],
    ]);
}

/// Fills `a` with the view matrix of a camera at `cam_pos` looking at
/// `cam_lookat`.
///
/// `temp_up` only needs to be roughly up; it must not be parallel to the
/// viewing direction.
pub fn lookat(a: &mut Matrix4, cam_pos: Vector3, cam_lookat: Vector3, temp_up: Vector3) {
    let forward = (cam_pos - cam_lookat).unit();
    let right = cross(temp_up.unit(), forward).unit();
    let up = cross(forward, right).unit();

    *a = Matrix4::from_cols([
        [right.x, up.x, forward.x, 0.0],
        [right.y, up.y, forward.y, 0.0],
        [right.z, up.z, forward.z, 0.0],
        [
            -dot(right, cam_pos),
            -dot(up, cam_pos),
            -dot(forward, cam_pos),
            1.0,
        ],
    ]);
}

/// Projection settings for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fovx: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fovx: FRAC_PI_2,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

/// A view matrix and a projection matrix, both identity until generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Matrix4,
    projection: Matrix4,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            view: Matrix4::IDENTITY,
            projection: Matrix4::IDENTITY,
        }
    }

    pub fn gen_perspective(&mut self, fovx: f32, aspect_ratio: f32, near: f32, far: f32) {
        log::debug!(
            "Perspective projection: fovx={fovx}, aspect={aspect_ratio}, near={near}, far={far}"
        );
        gen_perspective_proj(&mut self.projection, fovx, aspect_ratio, near, far);
    }

    pub fn gen_orthographic(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        log::debug!(
            "Orthographic projection: x=[{left}, {right}], y=[{bottom}, {top}], z=[{near}, {far}]"
        );
        gen_orthographic_proj(&mut self.projection, left, right, bottom, top, near, far);
    }

    /// Regenerates the projection matrix from `projection`.
    pub fn apply(&mut self, projection: Projection) {
        match projection {
            Projection::Perspective {
                fovx,
                aspect_ratio,
                near,
                far,
            } => self.gen_perspective(fovx, aspect_ratio, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => self.gen_orthographic(left, right, bottom, top, near, far),
        }
    }

    pub fn look_at(&mut self, cam_pos: Vector3, cam_lookat: Vector3, temp_up: Vector3) {
        log::trace!("Camera at {cam_pos} looking at {cam_lookat}");
        lookat(&mut self.view, cam_pos, cam_lookat, temp_up);
    }

    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    pub fn view(&self) -> &Matrix4 {
        &self.view
    }

    /// Projection applied after view.
    pub fn view_projection(&self) -> Matrix4 {
        self.projection * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_layout() {
        let mut a = Matrix4::IDENTITY;
        gen_perspective_proj(&mut a, FRAC_PI_2, 16.0 / 9.0, 0.1, 10.0);

        let right = (FRAC_PI_2 / 2.0).tan() * 0.1;
        let top = right / (16.0 / 9.0);
        assert_relative_eq!(a[0][0], 2.0 * 0.1 / (2.0 * right));
        assert_relative_eq!(a[0][0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(a[1][1], 2.0 * 0.1 / (2.0 * top));
        assert_eq!(a[2][0], 0.0);
        assert_eq!(a[2][1], 0.0);
        assert_relative_eq!(a[2][2], -(10.1 / 9.9), epsilon = 1e-6);
        assert_eq!(a[2][3], -1.0);
        assert_relative_eq!(a[3][2], -(2.0 / 9.9), epsilon = 1e-6);
        assert_eq!(a[3][3], 0.0);
        assert_eq!(a[0][3], 0.0);
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let mut a = Matrix4::IDENTITY;
        gen_perspective_proj(&mut a, FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = a.transform_point(Vector3::new(0.0, 0.0, -1.0));
        let far = a.transform_point(Vector3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orthographic() {
        let mut a = Matrix4::ZERO;
        gen_orthographic_proj(&mut a, -2.0, 2.0, -1.0, 1.0, 0.5, 4.5);
        assert_eq!(a.get(3, 0), 0.0);
        assert_eq!(a.get(3, 3), 1.0);
        assert_eq!(&a.data()[12..16], &[0.0, 0.0, -1.25, 1.0]);

        let corner = a.transform_point(Vector3::new(2.0, 1.0, -4.5));
        assert_relative_eq!(corner, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
        let corner = a.transform_point(Vector3::new(-2.0, -1.0, -0.5));
        assert_relative_eq!(corner, Vector3::new(-1.0, -1.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_lookat_moves_camera_to_origin() {
        let mut view = Matrix4::ZERO;
        let eye = Vector3::new(0.0, 0.0, 3.0);
        lookat(&mut view, eye, Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(view.transform_point(eye), Vector3::ZERO, epsilon = 1e-6);

        // The target sits straight ahead, down -z.
        let target = view.transform_point(Vector3::ZERO);
        assert_relative_eq!(target, Vector3::new(0.0, 0.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_lookat_basis_is_orthonormal() {
        let mut view = Matrix4::ZERO;
        lookat(
            &mut view,
            Vector3::new(4.0, 2.0, -3.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(0.0, 3.0, 0.0),
        );
        let rows: Vec<Vector3> = (0..3)
            .map(|r| Vector3::new(view.get(r, 0), view.get(r, 1), view.get(r, 2)))
            .collect();
        for (i, a) in rows.iter().enumerate() {
            assert_relative_eq!(a.len(), 1.0, epsilon = 1e-5);
            for b in &rows[i + 1..] {
                assert_relative_eq!(a.dot(*b), 0.0, epsilon = 1e-5);
            }
        }
        assert_eq!(view.get(3, 3), 1.0);
    }

    #[test]
    fn test_camera_starts_as_identity() {
        let camera = Camera::new();
        assert_eq!(*camera.view(), Matrix4::IDENTITY);
        assert_eq!(*camera.projection(), Matrix4::IDENTITY);
    }

    #[test]
    fn test_camera_apply_default_projection() {
        let mut camera = Camera::default();
        camera.apply(Projection::default());

        let mut expected = Matrix4::ZERO;
        gen_perspective_proj(&mut expected, FRAC_PI_2, 16.0 / 9.0, 0.1, 10.0);
        assert_eq!(*camera.projection(), expected);
    }

    #[test]
    fn test_camera_view_projection() {
        let mut camera = Camera::new();
        camera.gen_orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0);
        camera.look_at(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::ZERO,
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(
            camera.view_projection(),
            *camera.projection() * *camera.view()
        );
        let p = camera.view_projection().transform_point(Vector3::ZERO);
        assert_relative_eq!(p, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-6);
    }
}
