use tracing::{info, warn};

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::geometry::types::CanvasGeometry;
use crate::image_pipeline::pnm::types::GrayRaster;
use crate::image_pipeline::warp::backend::AffineWarp;
use crate::image_pipeline::warp::{CpuWarp, NppSession};

/// Requested warp backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WarpBackend {
    /// NPP when it can be initialised, CPU otherwise
    #[default]
    Auto,
    /// NPP only; failing to initialise it is an error
    Npp,
    /// Host resampler
    Cpu,
}

/// The warp backend chosen for this run.
pub enum WarpEngine {
    Cpu(CpuWarp),
    Npp(NppSession),
}

impl WarpEngine {
    /// Opens the requested backend. Call only after inputs are validated:
    /// this is where the accelerator is first touched.
    pub fn open(backend: WarpBackend) -> Result<Self> {
        match backend {
            WarpBackend::Cpu => Ok(WarpEngine::Cpu(CpuWarp::new())),
            WarpBackend::Npp => NppSession::new(0)
                .map(WarpEngine::Npp)
                .map_err(|e| TransformError::AcceleratorFailure(format!("{e:#}"))),
            WarpBackend::Auto => match NppSession::new(0) {
                Ok(session) => Ok(WarpEngine::Npp(session)),
                Err(e) => {
                    warn!("NPP unavailable ({e:#}), falling back to CPU warp");
                    Ok(WarpEngine::Cpu(CpuWarp::new()))
                }
            },
        }
    }

    fn backend(&self) -> &dyn AffineWarp {
        match self {
            WarpEngine::Cpu(cpu) => cpu,
            WarpEngine::Npp(session) => session,
        }
    }
}

impl AffineWarp for WarpEngine {
    fn describe(&self) -> String {
        self.backend().describe()
    }

    fn warp_affine(&self, src: &GrayRaster, geometry: &CanvasGeometry) -> Result<GrayRaster> {
        info!("Warping with {}", self.describe());
        self.backend().warp_affine(src, geometry)
    }
}
