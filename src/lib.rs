//! SO(2)×S image transform: rotate and uniformly scale an 8-bit grayscale
//! image onto a canvas that bounds the result, using NPP's affine warp on
//! CUDA hosts and a CPU resampler elsewhere.

pub mod app;
pub mod cli;
pub mod image_pipeline;
pub mod logger;
