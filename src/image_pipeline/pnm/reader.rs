use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pnm::types::GrayRaster;

pub trait GrayImageReader {
    fn read_gray(&self, data: &[u8]) -> Result<GrayRaster>;
}
