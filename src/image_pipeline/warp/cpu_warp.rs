use tracing::{debug, info};

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::geometry::types::CanvasGeometry;
use crate::image_pipeline::pnm::types::GrayRaster;
use crate::image_pipeline::warp::backend::AffineWarp;

/// Sample positions this close outside the source edge still count as inside.
const EDGE_EPSILON: f64 = 1e-6;

/// Host-side bilinear warp with the same mapping convention as
/// `nppiWarpAffine_8u_C1R`.
pub struct CpuWarp;

impl CpuWarp {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuWarp {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_bilinear(src: &GrayRaster, x: f64, y: f64) -> Option<u8> {
    let max_x = (src.width - 1) as f64;
    let max_y = (src.height - 1) as f64;
    if x < -EDGE_EPSILON || y < -EDGE_EPSILON || x > max_x + EDGE_EPSILON || y > max_y + EDGE_EPSILON {
        return None;
    }
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = f64::from(src.pixel(x0, y0));
    let p10 = f64::from(src.pixel(x1, y0));
    let p01 = f64::from(src.pixel(x0, y1));
    let p11 = f64::from(src.pixel(x1, y1));

    let top = p00 + fx * (p10 - p00);
    let bottom = p01 + fx * (p11 - p01);
    let value = top + fy * (bottom - top);

    Some((value + 0.5).floor().clamp(0.0, 255.0) as u8)
}

impl AffineWarp for CpuWarp {
    fn describe(&self) -> String {
        "CPU bilinear warp (host fallback)".to_string()
    }

    fn warp_affine(&self, src: &GrayRaster, geometry: &CanvasGeometry) -> Result<GrayRaster> {
        if src.width == 0 || src.height == 0 {
            return Err(TransformError::InvalidGeometry(format!(
                "source image is empty ({}x{})",
                src.width, src.height
            )));
        }
        if geometry.dst_width == 0 || geometry.dst_height == 0 {
            return Err(TransformError::InvalidGeometry(format!(
                "destination canvas is empty ({}x{})",
                geometry.dst_width, geometry.dst_height
            )));
        }
        let inverse = geometry.matrix.inverse().ok_or_else(|| {
            TransformError::InvalidGeometry("affine matrix is singular".to_string())
        })?;

        info!(
            "Warping {}x{} -> {}x{} on the CPU",
            src.width, src.height, geometry.dst_width, geometry.dst_height
        );

        let mut dst = GrayRaster::try_filled(geometry.dst_width, geometry.dst_height, 0)?;
        let mut written = 0usize;
        for (y, row) in dst.data.chunks_exact_mut(geometry.dst_width).enumerate() {
            for (x, out) in row.iter_mut().enumerate() {
                let (sx, sy) = inverse.apply(x as f64, y as f64);
                if let Some(value) = sample_bilinear(src, sx, sy) {
                    *out = value;
                    written += 1;
                }
            }
        }

        debug!("CPU warp wrote {} of {} pixels", written, dst.data.len());
        Ok(dst)
    }
}
