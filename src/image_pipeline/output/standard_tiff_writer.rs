use std::io::{Cursor, Write};
use tracing::debug;
use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::output::types::TiffCompression;
use crate::image_pipeline::output::writer::GrayImageWriter;
use crate::image_pipeline::pnm::types::GrayRaster;

pub struct StandardTiffWriter {
    pub compression: TiffCompression,
}

impl GrayImageWriter for StandardTiffWriter {
    fn write_gray(&self, image: &GrayRaster, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        let compression = match self.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
        };

        let width = u32::try_from(image.width)
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;
        let height = u32::try_from(image.height)
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;

        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?
            .with_compression(compression);

        encoder
            .write_image::<tiff::encoder::colortype::Gray8>(width, height, &image.to_packed())
            .map_err(|e| TransformError::EncodeFailure(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
