use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::output::pgm_writer::encoded_size;
use crate::image_pipeline::output::writer::GrayImageWriter;
use crate::image_pipeline::pnm::types::GrayRaster;

pub struct PngWriter;

impl GrayImageWriter for PngWriter {
    fn write_gray(&self, image: &GrayRaster, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width, image.height);

        let (width, height) = encoded_size(image)?;
        let mut buffer = Vec::new();

        PngEncoder::new(&mut buffer)
            .write_image(&image.to_packed(), width, height, ExtendedColorType::L8)
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}
