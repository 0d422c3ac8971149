/// Model matrix from marker pose estimates
use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};

/// Build the model matrix for one detected marker.
///
/// `rvec` is an axis-angle rotation and `tvec` a translation, both in the
/// vision library's camera frame. The pair is converted to an extrinsic
/// `[R | t]`, re-based through `coordinate_transform` into the renderer's
/// frame, and embedded in a homogeneous matrix. The result is column-major
/// (`.as_slice()`), so the renderer receives basis vectors in columns
/// where the vision convention is row-major.
///
/// Called once per marker per frame; everything here is a fixed-size
/// stack-allocated matrix.
pub fn model_from_pose(
    rvec: &Vector3<f32>,
    tvec: &Vector3<f32>,
    coordinate_transform: &Matrix3<f32>,
) -> Matrix4<f32> {
    // Rodrigues: exponential map from axis-angle to a rotation matrix.
    let rotation = Rotation3::from_scaled_axis(*rvec);

    let basis = coordinate_transform * rotation.matrix();
    let translation = coordinate_transform * tvec;

    let mut model = Matrix4::identity();
    model.fixed_view_mut::<3, 3>(0, 0).copy_from(&basis);
    model.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);

    model
}

/// Apply the configured uniform scale and user translation offset on top
/// of a pose matrix, in the order the renderer multiplies them.
pub fn compose_model(pose: &Matrix4<f32>, scale: f32, offset: &Vector3<f32>) -> Matrix4<f32> {
    pose * Matrix4::new_scaling(scale) * Matrix4::new_translation(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_zero_pose_identity_transform_is_identity() {
        let model = model_from_pose(
            &Vector3::zeros(),
            &Vector3::zeros(),
            &Matrix3::identity(),
        );
        assert!((model - Matrix4::identity()).norm() < EPS);
    }

    #[test]
    fn test_translation_lands_in_last_column() {
        let model = model_from_pose(
            &Vector3::zeros(),
            &Vector3::new(0.1, 0.2, 0.3),
            &Matrix3::identity(),
        );

        // Column-major flat layout: indices 12..15 are the last column.
        let flat = model.as_slice();
        assert!((flat[12] - 0.1).abs() < EPS);
        assert!((flat[13] - 0.2).abs() < EPS);
        assert!((flat[14] - 0.3).abs() < EPS);
        assert_eq!(flat[15], 1.0);
    }

    #[test]
    fn test_half_turn_about_z() {
        let model = model_from_pose(
            &Vector3::new(0.0, 0.0, std::f32::consts::PI),
            &Vector3::zeros(),
            &Matrix3::identity(),
        );

        assert!((model[(0, 0)] + 1.0).abs() < EPS);
        assert!((model[(1, 1)] + 1.0).abs() < EPS);
        assert!((model[(2, 2)] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_default_coordinate_transform_flips_y_and_z() {
        let config = ViewerConfig::default();
        let model = model_from_pose(
            &Vector3::zeros(),
            &Vector3::new(0.0, 1.0, 1.0),
            &config.coordinate_transform,
        );

        assert!((model[(0, 0)] - 1.0).abs() < EPS);
        assert!((model[(1, 1)] + 1.0).abs() < EPS);
        assert!((model[(2, 2)] + 1.0).abs() < EPS);
        // Translation re-based into the renderer frame too.
        assert!((model[(1, 3)] + 1.0).abs() < EPS);
        assert!((model[(2, 3)] + 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_matches_axis_angle_magnitude() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let model = model_from_pose(
            &Vector3::new(0.0, quarter, 0.0),
            &Vector3::zeros(),
            &Matrix3::identity(),
        );

        // 90 degrees about Y maps +X to -Z.
        assert!(model[(0, 0)].abs() < EPS);
        assert!((model[(2, 0)] + 1.0).abs() < EPS);
    }

    #[test]
    fn test_compose_applies_scale_then_offset() {
        let pose = Matrix4::identity();
        let composed = compose_model(&pose, 2.0, &Vector3::new(1.0, 0.0, 0.0));

        assert!((composed[(0, 0)] - 2.0).abs() < EPS);
        // Offset is expressed in model units, so it is scaled as well.
        assert!((composed[(0, 3)] - 2.0).abs() < EPS);
    }
}
