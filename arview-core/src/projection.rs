/// Projection matrix from camera intrinsics
use nalgebra::{Matrix3, Matrix4};

/// Build a perspective projection matrix matching a calibrated camera.
///
/// The off-axis third-column terms encode the principal point offset so
/// the virtual camera's optical axis lines up with the physical one, and
/// near/far map depth into the renderer's clip-space convention. nalgebra
/// stores column-major, so `.as_slice()` on the result is exactly the
/// flattened layout the renderer consumes.
///
/// Pure and bit-stable for equal inputs; recompute whenever the viewport
/// is resized.
pub fn projection_from_intrinsics(
    intrinsics: &Matrix3<f32>,
    width: u32,
    height: u32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    let fx = intrinsics[(0, 0)];
    let fy = intrinsics[(1, 1)];
    let cx = intrinsics[(0, 2)];
    let cy = intrinsics[(1, 2)];

    let w = width as f32;
    let h = height as f32;

    Matrix4::new(
        2.0 * fx / w, 0.0, 1.0 - 2.0 * cx / w, 0.0, //
        0.0, 2.0 * fy / h, 2.0 * cy / h - 1.0, 0.0, //
        0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near), //
        0.0, 0.0, -1.0, 0.0,
    )
}
