//! Raster image types

use crate::image_pipeline::common::error::{Result, TransformError};

/// Single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Bytes per row, at least `width`
    pub stride: usize,
    /// Pixel data, `stride * height` bytes
    pub data: Vec<u8>,
}

impl GrayRaster {
    /// Tightly packed raster filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            stride: width,
            data: vec![value; width * height],
        }
    }

    /// Like [`GrayRaster::filled`], but reports an oversized or unallocatable
    /// raster as `InvalidGeometry` instead of aborting.
    pub fn try_filled(width: usize, height: usize, value: u8) -> Result<Self> {
        let len = width.checked_mul(height).ok_or_else(|| {
            TransformError::InvalidGeometry(format!(
                "{}x{} raster size overflows",
                width, height
            ))
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            TransformError::InvalidGeometry(format!(
                "cannot allocate a {}x{} raster: {}",
                width, height, e
            ))
        })?;
        data.resize(len, value);

        Ok(Self {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// Wraps tightly packed pixel data.
    pub fn from_packed(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(TransformError::DecodeFailure(format!(
                "expected {} bytes for a {}x{} raster, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride: width,
            data,
        })
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Copy without row padding, as encoders expect.
    pub fn to_packed(&self) -> Vec<u8> {
        if self.stride == self.width {
            return self.data[..self.width * self.height].to_vec();
        }
        (0..self.height).flat_map(|y| self.row(y).iter().copied()).collect()
    }
}
