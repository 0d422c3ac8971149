/// Viewer configuration defaults
use nalgebra::Matrix3;

/// Tunable parameters for one viewer session.
///
/// `swap_yz` and `coordinate_transform` both touch the vertical axis but
/// compensate for different things: the first fixes up-axis conventions in
/// the asset file, the second re-maps the vision library's camera frame
/// (right-handed, Y down) into the renderer's frame. They are kept as
/// independent options.
#[derive(Debug, Clone, Copy)]
pub struct ViewerConfig {
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Physical marker edge length in meters.
    pub marker_size: f32,
    /// Uniform scale applied to the model on top of the pose matrix.
    pub model_scale: f32,
    /// Reorder Y/Z components of vertices and normals while parsing.
    pub swap_yz: bool,
    /// Basis change from the vision camera frame to the renderer frame.
    pub coordinate_transform: Matrix3<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            near: 0.01,
            far: 1000.0,
            marker_size: 0.16,
            model_scale: 0.03,
            swap_yz: true,
            // Flip Y and Z: vision has Y down and Z forward.
            coordinate_transform: Matrix3::new(
                1.0, 0.0, 0.0, //
                0.0, -1.0, 0.0, //
                0.0, 0.0, -1.0,
            ),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        ViewerConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform_flips_y_and_z() {
        let config = ViewerConfig::default();
        let t = config.coordinate_transform;
        assert_eq!(t[(0, 0)], 1.0);
        assert_eq!(t[(1, 1)], -1.0);
        assert_eq!(t[(2, 2)], -1.0);
        assert!(config.near < config.far);
    }
}
