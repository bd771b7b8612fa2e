// IntSar-3D: per-frame matrix uploads for a spinning object
//
// Builds the model, view and projection matrices the renderer would upload
// each frame and logs the buffers. Set RUST_LOG=info to see them.

use intsar_math::{radians, rotate, Camera, Matrix4, Projection, Transform, Vector3};

const DEFAULT_FRAMES: u32 = 4;

// Uniform block layout shared with the shader: three column-major mat4s.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    model: [f32; 16],
    view: [f32; 16],
    projection: [f32; 16],
}

impl Uniforms {
    fn new() -> Self {
        Self {
            model: *Matrix4::IDENTITY.data(),
            view: *Matrix4::IDENTITY.data(),
            projection: *Matrix4::IDENTITY.data(),
        }
    }

    fn update(&mut self, model: &Matrix4, camera: &Camera) {
        self.model = *model.data();
        self.view = *camera.view().data();
        self.projection = *camera.projection().data();
    }
}

fn frame_count() -> u32 {
    match std::env::var("INTSAR_FRAMES") {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring INTSAR_FRAMES={value:?}, using {DEFAULT_FRAMES}");
            DEFAULT_FRAMES
        }),
        Err(_) => DEFAULT_FRAMES,
    }
}

fn main() {
    // Initialize logging
    env_logger::init();

    let mut camera = Camera::new();
    camera.apply(Projection::default());
    camera.look_at(
        Vector3::new(0.0, 0.0, 3.0),
        Vector3::ZERO,
        Vector3::new(0.0, 1.0, 0.0),
    );

    let mut model = Transform {
        position: Vector3::new(0.0, -1.0, 0.0),
        scale: Vector3::new(0.5, 0.5, 0.5),
        ..Transform::identity()
    }
    .matrix();

    let spin_axis = Vector3::new(0.0, -1.0, 0.0);
    let spin_per_frame = radians(15.0);
    let mut uniforms = Uniforms::new();

    for frame in 0..frame_count() {
        rotate(&mut model, spin_axis, spin_per_frame);
        uniforms.update(&model, &camera);

        let bytes = bytemuck::bytes_of(&uniforms);
        log::info!("Frame {frame}: uploading {} bytes", bytes.len());
        log::debug!("model:\n{model}");
        log::debug!("mvp:\n{}", camera.view_projection() * model);
    }
}
