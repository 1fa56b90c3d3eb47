use std::io::Write;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::output::writer::GrayImageWriter;
use crate::image_pipeline::pnm::types::GrayRaster;

/// Binary graymap (`P5`) writer.
pub struct PgmWriter;

impl GrayImageWriter for PgmWriter {
    fn write_gray(&self, image: &GrayRaster, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PGM image: {}x{}", image.width, image.height);

        let (width, height) = encoded_size(image)?;
        let mut buffer = Vec::new();

        PnmEncoder::new(&mut buffer)
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
            .write_image(&image.to_packed(), width, height, ExtendedColorType::L8)
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

pub(super) fn encoded_size(image: &GrayRaster) -> Result<(u32, u32)> {
    let width = u32::try_from(image.width)
        .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;
    let height = u32::try_from(image.height)
        .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;
    Ok((width, height))
}
