use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{Result, TransformError};
use crate::image_pipeline::conversions::{TransformConfig, TransformPipeline};
use crate::image_pipeline::geometry::CanvasGeometry;
use crate::image_pipeline::output::{GrayImageWriter, OutputFormat};
use crate::image_pipeline::pnm::{GrayImageReader, GrayRaster, PnmReader};
use crate::image_pipeline::warp::{AffineWarp, CpuWarp};

struct MockReader {
    should_fail: bool,
    mock_data: Option<GrayRaster>,
}

impl GrayImageReader for MockReader {
    fn read_gray(&self, _data: &[u8]) -> Result<GrayRaster> {
        if self.should_fail {
            return Err(TransformError::DecodeFailure("Mock decode error".to_string()));
        }
        Ok(self
            .mock_data
            .clone()
            .unwrap_or_else(|| GrayRaster::filled(512, 512, 128)))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<GrayRaster>>>,
}

impl GrayImageWriter for MockWriter {
    fn write_gray(&self, image: &GrayRaster, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(TransformError::EncodeFailure("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

/// Records the canvases it was asked for and returns blank output.
struct MockWarp {
    should_fail: bool,
    calls: Arc<Mutex<Vec<CanvasGeometry>>>,
}

impl AffineWarp for MockWarp {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    fn warp_affine(&self, _src: &GrayRaster, geometry: &CanvasGeometry) -> Result<GrayRaster> {
        self.calls.lock().unwrap().push(*geometry);
        if self.should_fail {
            return Err(TransformError::AcceleratorFailure("Mock warp error".to_string()));
        }
        Ok(GrayRaster::filled(geometry.dst_width, geometry.dst_height, 0))
    }
}

struct Harness {
    written: Arc<Mutex<Vec<GrayRaster>>>,
    warps: Arc<Mutex<Vec<CanvasGeometry>>>,
}

fn pipeline(
    reader: MockReader,
    writer_fails: bool,
    warp_fails: bool,
    config: TransformConfig,
) -> (TransformPipeline<MockReader, MockWriter, MockWarp>, Harness) {
    let harness = Harness {
        written: Arc::new(Mutex::new(Vec::new())),
        warps: Arc::new(Mutex::new(Vec::new())),
    };
    let writer = MockWriter {
        should_fail: writer_fails,
        written_data: harness.written.clone(),
    };
    let warper = MockWarp {
        should_fail: warp_fails,
        calls: harness.warps.clone(),
    };
    (
        TransformPipeline::with_custom(reader, writer, warper, config),
        harness,
    )
}

fn ok_reader() -> MockReader {
    MockReader { should_fail: false, mock_data: None }
}

fn pgm_bytes(raster: &GrayRaster) -> Vec<u8> {
    let mut bytes = format!("P5\n{} {}\n255\n", raster.width, raster.height).into_bytes();
    bytes.extend_from_slice(&raster.to_packed());
    bytes
}

#[test]
fn test_config_builder() {
    let config = TransformConfig::builder()
        .rotation(30.0)
        .scale(2.5)
        .output_format(OutputFormat::Tiff)
        .strict_params(false)
        .max_dimension(Some(10000))
        .build();

    assert_eq!(config.params.rotation_deg, 30.0);
    assert_eq!(config.params.scale, 2.5);
    assert_eq!(config.output_format, OutputFormat::Tiff);
    assert!(!config.strict_params);
    assert_eq!(config.max_dimension, Some(10000));
}

#[test]
fn test_config_defaults() {
    let config = TransformConfig::builder().build();

    assert_eq!(config, TransformConfig::default());
    assert_eq!(config.params.rotation_deg, 45.0);
    assert_eq!(config.params.scale, 1.0);
    assert_eq!(config.output_format, OutputFormat::Pgm);
}

#[test]
fn test_successful_conversion() {
    let (pipeline, harness) = pipeline(ok_reader(), false, false, TransformConfig::default());

    let mut output = Vec::new();
    let report = pipeline.convert(b"fake pgm data", &mut output).unwrap();

    assert_eq!((report.src_width, report.src_height), (512, 512));
    assert_eq!(
        (report.geometry.dst_width, report.geometry.dst_height),
        (725, 725)
    );
    assert_eq!(harness.warps.lock().unwrap().len(), 1);

    let written = harness.written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!((written[0].width, written[0].height), (725, 725));
    assert!(report.timings.get_step("warp_affine").is_some());
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_data: None };
    let (pipeline, harness) = pipeline(reader, false, false, TransformConfig::default());

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::DecodeFailure(_)));
    assert!(harness.warps.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _harness) = pipeline(ok_reader(), true, false, TransformConfig::default());

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::EncodeFailure(_)));
}

#[test]
fn test_warp_failure_skips_encoding() {
    let (pipeline, harness) = pipeline(ok_reader(), false, true, TransformConfig::default());

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::AcceleratorFailure(_)));
    assert!(harness.written.lock().unwrap().is_empty());
}

#[test]
fn test_zero_scale_rejected_before_warp() {
    let config = TransformConfig::builder().scale(0.0).build();
    let (pipeline, harness) = pipeline(ok_reader(), false, false, config);

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::InvalidGeometry(_)));
    assert!(harness.warps.lock().unwrap().is_empty());
}

#[test]
fn test_zero_scale_rejected_even_when_lenient() {
    let config = TransformConfig::builder().scale(0.0).strict_params(false).build();
    let (pipeline, harness) = pipeline(ok_reader(), false, false, config);

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::InvalidGeometry(_)));
    assert!(harness.warps.lock().unwrap().is_empty());
}

#[test]
fn test_negative_scale_mirrors_when_lenient() {
    let config = TransformConfig::builder().rotation(0.0).scale(-1.0).strict_params(false).build();
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(GrayRaster::filled(40, 20, 1)),
    };
    let (pipeline, harness) = pipeline(reader, false, false, config);

    let report = pipeline.convert(b"fake pgm data", &mut Vec::new()).unwrap();

    assert_eq!((report.geometry.dst_width, report.geometry.dst_height), (40, 20));
    assert_eq!(harness.warps.lock().unwrap()[0].matrix.coeffs()[0][0], -1.0);
}

#[test]
fn test_negative_scale_rejected_when_strict() {
    let config = TransformConfig::builder().scale(-1.0).build();
    let (pipeline, _harness) = pipeline(ok_reader(), false, false, config);

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::InvalidGeometry(_)));
}

#[test]
fn test_max_dimension_guard() {
    let config = TransformConfig::builder().scale(4.0).max_dimension(Some(1024)).build();
    let (pipeline, harness) = pipeline(ok_reader(), false, false, config);

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::InvalidGeometry(_)));
    assert!(harness.warps.lock().unwrap().is_empty());
}

#[test]
fn test_empty_source_rejected() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(GrayRaster::filled(0, 0, 0)),
    };
    let (pipeline, _harness) = pipeline(reader, false, false, TransformConfig::default());

    let result = pipeline.convert(b"fake pgm data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), TransformError::InvalidGeometry(_)));
}

#[test]
fn test_end_to_end_file_with_cpu_warp() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("square.pgm");
    let output = dir.path().join("square_transformed.pgm");

    let source = GrayRaster::filled(512, 512, 180);
    std::fs::write(&input, pgm_bytes(&source)).unwrap();

    let pipeline = TransformPipeline::new(TransformConfig::default(), CpuWarp::new());
    let report = pipeline.convert_file(&input, &output).unwrap();

    assert_eq!(
        (report.geometry.dst_width, report.geometry.dst_height),
        (725, 725)
    );

    let written = PnmReader.read_gray(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!((written.width, written.height), (725, 725));
    // corners fall outside the rotated square, the centre inside it
    assert_eq!(written.pixel(0, 0), 0);
    assert_eq!(written.pixel(362, 362), 180);
}

#[test]
fn test_end_to_end_tiff_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("small.pgm");
    let output = dir.path().join("small.tiff");
    std::fs::write(&input, pgm_bytes(&GrayRaster::filled(16, 12, 90))).unwrap();

    let config = TransformConfig::builder()
        .rotation(90.0)
        .output_format(OutputFormat::Tiff)
        .build();
    let pipeline = TransformPipeline::new(config, CpuWarp::new());
    let report = pipeline.convert_file(&input, &output).unwrap();

    assert_eq!((report.geometry.dst_width, report.geometry.dst_height), (12, 16));
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
}

#[test]
fn test_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.pgm");
    let output = dir.path().join("missing_transformed.pgm");

    let pipeline = TransformPipeline::new(TransformConfig::default(), CpuWarp::new());
    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result.unwrap_err(), TransformError::InputNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_decode_failure_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pgm");
    let output = dir.path().join("broken_transformed.pgm");
    std::fs::write(&input, b"P5\n4 4\n255\n\x01\x02").unwrap();

    let pipeline = TransformPipeline::new(TransformConfig::default(), CpuWarp::new());
    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result.unwrap_err(), TransformError::DecodeFailure(_)));
    assert!(!output.exists());
}
