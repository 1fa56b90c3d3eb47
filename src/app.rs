//! One run of the tool: validate the input, open the warp backend, transform
//! and report.

use std::fs::File;
use std::path::Path;

use crate::cli::Cli;
use crate::image_pipeline::{AffineWarp, Result, TransformError, TransformPipeline, TransformReport, WarpEngine};
use crate::logger::{debug, info};

/// Fails with `InputNotFound` unless `path` can be opened for reading.
pub fn ensure_input_readable(path: &Path) -> Result<()> {
    File::open(path)
        .map(|_| ())
        .map_err(|e| TransformError::InputNotFound(format!("{}: {}", path.display(), e)))
}

pub fn run(cli: &Cli) -> Result<TransformReport> {
    info!("SO(2) x S Transformation Parameters:");
    info!("  Rotation angle: {:.2} degrees", cli.rotation);
    info!("  Scale factor: {:.2}", cli.scale);

    let input = cli.input_path();
    ensure_input_readable(&input)?;
    info!("SO(2) x S Transform opened: <{}> successfully!", input.display());

    let output = cli.output_path(&input);
    let config = cli.transform_config(&output);
    debug!("Resolved configuration: {:?}", config);

    // First point where the accelerator is touched.
    let engine = WarpEngine::open(cli.backend)?;
    info!("{}", engine.describe());

    let pipeline = TransformPipeline::new(config, engine);
    let report = pipeline.convert_file(&input, &output)?;

    info!("Saved transformed image: {}", output.display());
    info!(
        "Applied transformations: Rotation={}°, Scale={} ({}x{} -> {}x{})",
        cli.rotation,
        cli.scale,
        report.src_width,
        report.src_height,
        report.geometry.dst_width,
        report.geometry.dst_height
    );

    if cli.timings {
        report.timings.print_summary();
    }

    Ok(report)
}
