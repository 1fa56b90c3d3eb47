//! Image processing pipeline module
//!
//! This module rotates and scales 8-bit grayscale images, with separate
//! modules for canvas geometry, raster decoding, affine warping, output
//! encoding, and run orchestration.

pub mod common;
pub mod geometry;
pub mod pnm;
pub mod warp;
pub mod output;
pub mod conversions;

pub use common::{
    PipelineTimings,
    TransformError,
    Result,
};

pub use geometry::{
    compute_transform,
    AffineMatrix,
    CanvasGeometry,
    TransformParams,
};

pub use pnm::{
    GrayRaster,
    GrayImageReader,
    PnmReader,
};

pub use warp::{
    AffineWarp,
    CpuWarp,
    NppSession,
    WarpBackend,
    WarpEngine,
};

pub use output::{
    FormatWriter,
    GrayImageWriter,
    OutputFormat,
    TiffCompression,
};

pub use conversions::{
    TransformConfig,
    TransformConfigBuilder,
    TransformPipeline,
    TransformReport,
};
