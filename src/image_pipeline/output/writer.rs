use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pnm::types::GrayRaster;

pub trait GrayImageWriter {
    fn write_gray(&self, image: &GrayRaster, output: &mut dyn Write) -> Result<()>;
}
