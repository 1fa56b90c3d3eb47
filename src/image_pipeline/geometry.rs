//! SO(2)×S geometry: output canvas sizing and affine coefficients for a
//! rotation followed by a uniform scale about the image centre.

mod solver;
pub mod types;

pub use solver::compute_transform;
pub use types::{AffineMatrix, CanvasGeometry, TransformParams};
