/// Camera calibration data produced by the vision collaborator
use nalgebra::Matrix3;

use crate::error::{Error, Result};

/// Distortion vector lengths the vision library can produce.
const DISTORTION_LENGTHS: &[usize] = &[4, 5, 8, 12, 14];

/// Camera intrinsics plus lens distortion coefficients.
///
/// Loaded once at startup, before any model loading; a shape mismatch is a
/// fatal error. The distortion coefficients are carried for the external
/// pose estimator, the core itself only consumes the intrinsics.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub matrix: Matrix3<f32>,
    pub dist_coeffs: Vec<f32>,
}

impl Calibration {
    pub fn new(matrix: Matrix3<f32>, dist_coeffs: Vec<f32>) -> Result<Self> {
        if !DISTORTION_LENGTHS.contains(&dist_coeffs.len()) {
            return Err(Error::DistortionShape(dist_coeffs.len()));
        }

        Ok(Self {
            matrix,
            dist_coeffs,
        })
    }

    /// Build from row-major slices, validating shapes.
    pub fn from_slices(matrix: &[f32], dist_coeffs: &[f32]) -> Result<Self> {
        if matrix.len() != 9 {
            return Err(Error::CalibrationShape(matrix.len()));
        }

        Calibration::new(
            Matrix3::from_row_slice(matrix),
            dist_coeffs.to_vec(),
        )
    }

    pub fn fx(&self) -> f32 {
        self.matrix[(0, 0)]
    }

    pub fn fy(&self) -> f32 {
        self.matrix[(1, 1)]
    }

    pub fn cx(&self) -> f32 {
        self.matrix[(0, 2)]
    }

    pub fn cy(&self) -> f32 {
        self.matrix[(1, 2)]
    }
}
