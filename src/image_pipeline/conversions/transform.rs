use tracing::{info, instrument};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::image_pipeline::{
    common::{error::{Result, TransformError}, timing::PipelineTimings},
    conversions::config::TransformConfig,
    geometry::{compute_transform, CanvasGeometry},
    output::{FormatWriter, GrayImageWriter},
    pnm::{GrayImageReader, GrayRaster, PnmReader},
    warp::AffineWarp,
};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct TransformReport {
    pub src_width: usize,
    pub src_height: usize,
    pub geometry: CanvasGeometry,
    pub timings: PipelineTimings,
}

pub struct TransformPipeline<R: GrayImageReader, W: GrayImageWriter, A: AffineWarp> {
    reader: R,
    writer: W,
    warper: A,
    config: TransformConfig,
}

impl<A: AffineWarp> TransformPipeline<PnmReader, FormatWriter, A> {
    /// PNM input, output encoded per `config.output_format`.
    pub fn new(config: TransformConfig, warper: A) -> Self {
        Self {
            reader: PnmReader,
            writer: FormatWriter::new(config.output_format, config.compression),
            warper,
            config,
        }
    }
}

impl<R: GrayImageReader, W: GrayImageWriter, A: AffineWarp> TransformPipeline<R, W, A> {
    pub fn with_custom(reader: R, writer: W, warper: A, config: TransformConfig) -> Self {
        Self {
            reader,
            writer,
            warper,
            config,
        }
    }

    fn solve_canvas(&self, source: &GrayRaster) -> Result<CanvasGeometry> {
        if source.width == 0 || source.height == 0 {
            return Err(TransformError::InvalidGeometry(format!(
                "source image is empty ({}x{})",
                source.width, source.height
            )));
        }

        let params = self.config.params;
        if self.config.strict_params {
            params.validate()?;
        }

        let geometry = compute_transform(source.width, source.height, params.rotation_deg, params.scale);
        geometry.validate(self.config.max_dimension)?;
        Ok(geometry)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<TransformReport> {
        info!("Starting SO(2) x S transform");
        let mut timings = PipelineTimings::new();

        let source = timings.measure("decode", || {
            let _span = tracing::info_span!("decode_pnm").entered();
            self.reader.read_gray(input_data)
        })?;

        let geometry = timings.measure("solve_canvas", || {
            let _span = tracing::info_span!("solve_canvas",
                width = source.width,
                height = source.height
            ).entered();
            self.solve_canvas(&source)
        })?;

        let warped = timings.measure("warp_affine", || {
            let _span = tracing::info_span!("warp_affine",
                dst_width = geometry.dst_width,
                dst_height = geometry.dst_height
            ).entered();
            self.warper.warp_affine(&source, &geometry)
        })?;

        timings.measure("encode", || {
            let _span = tracing::info_span!("encode_output").entered();
            self.writer.write_gray(&warped, output)
        })?;

        info!(
            src_width = source.width,
            src_height = source.height,
            dst_width = geometry.dst_width,
            dst_height = geometry.dst_height,
            "Transform complete"
        );

        Ok(TransformReport {
            src_width: source.width,
            src_height: source.height,
            geometry,
            timings,
        })
    }

    /// Transforms `input_path` into `output_path`. The output file is only
    /// created once the image has been fully encoded.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<TransformReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Transforming file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    TransformError::InputNotFound(format!("{}: {}", input_path.display(), e))
                }
                _ => TransformError::Io(e),
            })?
        };

        let mut encoded = Vec::new();
        let mut report = self.convert(&input_data, &mut encoded)?;

        report.timings.measure("write_output", || {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                TransformError::OutputWriteFailure(format!("{}: {}", output_path.display(), e))
            })
        })?;

        Ok(report)
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn warper(&self) -> &A {
        &self.warper
    }
}
