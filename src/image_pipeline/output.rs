//! Output encoding module
//!
//! This module writes 8-bit grayscale rasters as PGM, TIFF or PNG, with the
//! format chosen from the output path.

mod writer;
mod pgm_writer;
mod png_writer;
mod standard_tiff_writer;
mod format_writer;
pub mod types;

pub use writer::GrayImageWriter;
pub use pgm_writer::PgmWriter;
pub use png_writer::PngWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use format_writer::FormatWriter;
pub use types::{OutputFormat, TiffCompression};
