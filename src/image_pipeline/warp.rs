//! Affine warp backends for 8-bit grayscale rasters
//!
//! The NPP session is only compiled on hosts with the CUDA toolkit; other
//! builds get a stand-in whose constructor reports the accelerator missing.

mod backend;
pub mod cpu_warp;
mod engine;
#[cfg(npp_cuda)]
pub mod npp_warp;

// Stand-in when NPP was not found at build time
#[cfg(not(npp_cuda))]
pub struct NppSession;

#[cfg(not(npp_cuda))]
impl NppSession {
    pub fn new(_device_ordinal: usize) -> anyhow::Result<Self> {
        anyhow::bail!("NPP is not available in this build (CUDA toolkit not found at compile time)")
    }
}

#[cfg(not(npp_cuda))]
impl AffineWarp for NppSession {
    fn describe(&self) -> String {
        "NPP (unavailable)".to_string()
    }

    fn warp_affine(
        &self,
        _src: &GrayRaster,
        _geometry: &CanvasGeometry,
    ) -> crate::image_pipeline::Result<GrayRaster> {
        Err(crate::image_pipeline::TransformError::AcceleratorFailure(
            "NPP is not available in this build".to_string(),
        ))
    }
}

pub use backend::AffineWarp;
pub use cpu_warp::CpuWarp;
pub use engine::{WarpBackend, WarpEngine};
#[cfg(npp_cuda)]
pub use npp_warp::{DeviceRaster, NppSession};

#[cfg(not(npp_cuda))]
use crate::image_pipeline::{CanvasGeometry, GrayRaster};
