use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::output::types::{OutputFormat, TiffCompression};
use crate::image_pipeline::output::writer::GrayImageWriter;
use crate::image_pipeline::output::{PgmWriter, PngWriter, StandardTiffWriter};
use crate::image_pipeline::pnm::types::GrayRaster;

/// Dispatches to the writer for the configured output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatWriter {
    pub format: OutputFormat,
    pub compression: TiffCompression,
}

impl FormatWriter {
    pub fn new(format: OutputFormat, compression: TiffCompression) -> Self {
        Self { format, compression }
    }
}

impl GrayImageWriter for FormatWriter {
    fn write_gray(&self, image: &GrayRaster, output: &mut dyn Write) -> Result<()> {
        match self.format {
            OutputFormat::Pgm => PgmWriter.write_gray(image, output),
            OutputFormat::Png => PngWriter.write_gray(image, output),
            OutputFormat::Tiff => StandardTiffWriter {
                compression: self.compression,
            }
            .write_gray(image, output),
        }
    }
}
