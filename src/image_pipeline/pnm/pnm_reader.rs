//! PNM image reader implementation using the image library.
//!
//! Binary (`P5`) and ASCII (`P2`) graymaps decode directly to 8-bit luma.
//! Other PNM variants (16-bit graymaps, pixmaps, bitmaps) are accepted and
//! reduced to 8-bit luma by the codec.

use std::io::Cursor;

use image::{ColorType, ImageFormat, ImageReader};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::pnm::reader::GrayImageReader;
use crate::image_pipeline::pnm::types::GrayRaster;

pub struct PnmReader;

impl GrayImageReader for PnmReader {
    /// Decodes PNM bytes into a tightly packed 8-bit raster.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_transform_npp::image_pipeline::{GrayImageReader, PnmReader};
    ///
    /// let pgm = b"P2\n2 1\n255\n0 255\n";
    /// let raster = PnmReader.read_gray(pgm).unwrap();
    /// assert_eq!((raster.width, raster.height), (2, 1));
    /// assert_eq!(raster.data, vec![0, 255]);
    /// ```
    fn read_gray(&self, data: &[u8]) -> Result<GrayRaster> {
        debug!("Decoding PNM image, {} bytes", data.len());

        let decoded = ImageReader::with_format(Cursor::new(data), ImageFormat::Pnm)
            .decode()
            .map_err(|e| TransformError::DecodeFailure(e.to_string()))?;

        if decoded.color() != ColorType::L8 {
            warn!("Input is {:?}, converting to 8-bit grayscale", decoded.color());
        }

        let gray = decoded.into_luma8();
        let (width, height) = (gray.width() as usize, gray.height() as usize);

        debug!("Decoded image: {}x{}", width, height);

        GrayRaster::from_packed(width, height, gray.into_raw())
    }
}
