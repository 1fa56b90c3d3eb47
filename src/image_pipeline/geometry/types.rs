//! Geometry value types

use crate::image_pipeline::common::error::{Result, TransformError};

pub const DEFAULT_ROTATION_DEG: f64 = 45.0;
pub const DEFAULT_SCALE: f64 = 1.0;

/// Rotation angle (degrees, counter-clockwise in image coordinates) and
/// uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub rotation_deg: f64,
    pub scale: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            rotation_deg: DEFAULT_ROTATION_DEG,
            scale: DEFAULT_SCALE,
        }
    }
}

impl TransformParams {
    pub fn new(rotation_deg: f64, scale: f64) -> Self {
        Self { rotation_deg, scale }
    }

    /// Rejects parameters that cannot produce a usable canvas. Zero scale
    /// collapses the image and negative scale mirrors it, so both are refused.
    pub fn validate(&self) -> Result<()> {
        if !self.rotation_deg.is_finite() {
            return Err(TransformError::InvalidGeometry(format!(
                "rotation angle must be finite, got {}",
                self.rotation_deg
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TransformError::InvalidGeometry(format!(
                "scale factor must be a positive finite number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// 2x3 affine coefficients `[[a11, a12, a13], [a21, a22, a23]]`.
///
/// Follows the NPP `nppiWarpAffine` convention: the matrix maps a source
/// pixel `(x, y)` to its destination position `A · [x, y, 1]ᵗ`. Resamplers
/// invert it to find the source location of each destination pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    coeffs: [[f64; 3]; 2],
}

impl AffineMatrix {
    pub fn new(coeffs: [[f64; 3]; 2]) -> Self {
        Self { coeffs }
    }

    pub fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
    }

    pub fn coeffs(&self) -> &[[f64; 3]; 2] {
        &self.coeffs
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [[a11, a12, a13], [a21, a22, a23]] = self.coeffs;
        (a11 * x + a12 * y + a13, a21 * x + a22 * y + a23)
    }

    pub fn determinant(&self) -> f64 {
        let [[a11, a12, _], [a21, a22, _]] = self.coeffs;
        a11 * a22 - a12 * a21
    }

    /// Inverse transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let [[a11, a12, a13], [a21, a22, a23]] = self.coeffs;
        let inv_det = 1.0 / det;

        let b11 = a22 * inv_det;
        let b12 = -a12 * inv_det;
        let b21 = -a21 * inv_det;
        let b22 = a11 * inv_det;
        let b13 = -(b11 * a13 + b12 * a23);
        let b23 = -(b21 * a13 + b22 * a23);

        Some(Self::new([[b11, b12, b13], [b21, b22, b23]]))
    }
}

/// Destination canvas size and the matrix that places the transformed
/// source onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub dst_width: usize,
    pub dst_height: usize,
    pub matrix: AffineMatrix,
}

impl CanvasGeometry {
    /// Must pass before any destination buffer is allocated.
    pub fn validate(&self, max_dimension: Option<usize>) -> Result<()> {
        if self.dst_width == 0 || self.dst_height == 0 {
            return Err(TransformError::InvalidGeometry(format!(
                "destination canvas is empty ({}x{})",
                self.dst_width, self.dst_height
            )));
        }
        if let Some(max) = max_dimension {
            if self.dst_width > max || self.dst_height > max {
                return Err(TransformError::InvalidGeometry(format!(
                    "destination canvas {}x{} exceeds the {} pixel limit",
                    self.dst_width, self.dst_height, max
                )));
            }
        }
        // NPP sizes and steps are 32-bit signed.
        if i32::try_from(self.dst_width).is_err() || i32::try_from(self.dst_height).is_err() {
            return Err(TransformError::InvalidGeometry(format!(
                "destination canvas {}x{} is too large",
                self.dst_width, self.dst_height
            )));
        }
        Ok(())
    }
}
