use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::geometry::types::CanvasGeometry;
use crate::image_pipeline::pnm::types::GrayRaster;

/// A bilinear affine resampler.
///
/// `geometry.matrix` maps source coordinates to destination coordinates.
/// Destination pixels whose preimage falls outside the source stay 0.
pub trait AffineWarp {
    /// Banner line identifying the backend and its library version.
    fn describe(&self) -> String;

    fn warp_affine(&self, src: &GrayRaster, geometry: &CanvasGeometry) -> Result<GrayRaster>;
}
