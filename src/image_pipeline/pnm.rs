//! Grayscale raster reading module
//!
//! This module provides the 8-bit raster type shared by the pipeline and a
//! PNM-family decoder for it.

mod reader;
mod pnm_reader;
pub mod types;

pub use reader::GrayImageReader;
pub use pnm_reader::PnmReader;
pub use types::GrayRaster;
