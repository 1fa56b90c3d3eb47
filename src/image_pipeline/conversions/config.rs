//! Transform run configuration

use crate::image_pipeline::geometry::types::TransformParams;
use crate::image_pipeline::output::types::{OutputFormat, TiffCompression};

/// Configuration for one transform run
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    /// Rotation and scale to apply
    pub params: TransformParams,
    /// Encoded format of the output file
    pub output_format: OutputFormat,
    /// Compression used when the output format is TIFF
    pub compression: TiffCompression,
    /// Reject non-finite angles and non-positive scales up front. When off,
    /// a negative scale mirrors the image; empty canvases are still refused.
    pub strict_params: bool,
    /// Largest accepted destination width or height, if any
    pub max_dimension: Option<usize>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            params: TransformParams::default(),
            output_format: OutputFormat::Pgm,
            compression: TiffCompression::None,
            strict_params: true,
            max_dimension: None,
        }
    }
}

impl TransformConfig {
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::default()
    }
}

/// Builder for TransformConfig
#[derive(Default)]
pub struct TransformConfigBuilder {
    rotation_deg: Option<f64>,
    scale: Option<f64>,
    output_format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    strict_params: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl TransformConfigBuilder {
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation_deg = Some(degrees);
        self
    }

    pub fn scale(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn strict_params(mut self, strict: bool) -> Self {
        self.strict_params = Some(strict);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> TransformConfig {
        let default = TransformConfig::default();
        TransformConfig {
            params: TransformParams {
                rotation_deg: self.rotation_deg.unwrap_or(default.params.rotation_deg),
                scale: self.scale.unwrap_or(default.params.scale),
            },
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            strict_params: self.strict_params.unwrap_or(default.strict_params),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
