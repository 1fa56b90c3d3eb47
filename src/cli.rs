//! Command-line surface: flag model, unknown-flag filtering and the default
//! input/output paths.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use crate::image_pipeline::geometry::types::{DEFAULT_ROTATION_DEG, DEFAULT_SCALE};
use crate::image_pipeline::{OutputFormat, TiffCompression, TransformConfig, WarpBackend};

/// Sample image used when `--input` is not given.
pub const SAMPLE_IMAGE: &str = "sample.pgm";

/// Suffix appended to the input stem for the default output path.
pub const OUTPUT_SUFFIX: &str = "_transformed.pgm";

/// Rotate and uniformly scale an 8-bit grayscale image (SO(2) x S) onto a
/// canvas that bounds the result.
#[derive(Parser, Debug, Clone)]
#[command(name = "image_transform_npp", version)]
pub struct Cli {
    /// Input image file path (PGM)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output image file path; .tif/.tiff and .png select those formats
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rotation angle in degrees
    #[arg(long, value_name = "ANGLE", default_value_t = DEFAULT_ROTATION_DEG, allow_negative_numbers = true)]
    pub rotation: f64,

    /// Scaling factor
    #[arg(long, value_name = "FACTOR", default_value_t = DEFAULT_SCALE, allow_negative_numbers = true)]
    pub scale: f64,

    /// Warp backend
    #[arg(long, value_enum, default_value_t = WarpBackend::Auto)]
    pub backend: WarpBackend,

    /// TIFF compression, used only for TIFF output
    #[arg(long, value_enum, default_value_t = TiffCompression::None)]
    pub compression: TiffCompression,

    /// Refuse output canvases wider or taller than this many pixels
    #[arg(long, value_name = "PIXELS")]
    pub max_dimension: Option<usize>,

    /// Accept negative scale factors (mirrored output)
    #[arg(long)]
    pub allow_mirror: bool,

    /// Print a per-step timing summary
    #[arg(long)]
    pub timings: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses `args` after dropping flags and words this tool does not know.
    pub fn try_parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(retain_known_args(args))
    }

    pub fn input_path(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(find_sample_image)
    }

    pub fn output_path(&self, input: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input))
    }

    pub fn transform_config(&self, output: &Path) -> TransformConfig {
        TransformConfig::builder()
            .rotation(self.rotation)
            .scale(self.scale)
            .output_format(OutputFormat::from_path(output))
            .compression(self.compression)
            .strict_params(!self.allow_mirror)
            .max_dimension(self.max_dimension)
            .build()
    }
}

struct KnownFlag {
    long: String,
    short: Option<char>,
    takes_value: bool,
}

fn known_flags() -> Vec<KnownFlag> {
    let mut command = Cli::command();
    command.build();

    let mut flags: Vec<KnownFlag> = command
        .get_arguments()
        .filter_map(|arg| {
            let long = arg.get_long()?.to_string();
            Some(KnownFlag {
                long,
                short: arg.get_short(),
                takes_value: arg.get_action().takes_values(),
            })
        })
        .collect();

    for (long, short) in [("help", 'h'), ("version", 'V')] {
        if !flags.iter().any(|flag| flag.long == long) {
            flags.push(KnownFlag {
                long: long.to_string(),
                short: Some(short),
                takes_value: false,
            });
        }
    }
    flags
}

/// Keeps the program name, recognised flags and their values; drops anything
/// else. Accepts the single-dash long spelling (`-rotation=30`) and rewrites
/// it to `--rotation=30`.
pub fn retain_known_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let flags = known_flags();
    let mut args = args.into_iter().map(Into::<OsString>::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        if !text.starts_with('-') || text == "-" || text == "--" {
            continue;
        }

        let body = text.trim_start_matches('-');
        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let mut chars = name.chars();
        let flag = match (chars.next(), chars.next()) {
            (Some(c), None) if !text.starts_with("--") => {
                flags.iter().find(|flag| flag.short == Some(c))
            }
            _ => flags.iter().find(|flag| flag.long == name),
        };
        let Some(flag) = flag else {
            continue;
        };

        match inline_value {
            Some(value) => kept.push(format!("--{}={}", flag.long, value).into()),
            None => {
                kept.push(format!("--{}", flag.long).into());
                if flag.takes_value {
                    if let Some(value) = args.next() {
                        kept.push(value);
                    }
                }
            }
        }
    }

    kept
}

/// Looks for the sample image in the working directory, next to the
/// executable, and in the crate's `data/` directory.
pub fn find_sample_image() -> PathBuf {
    let mut candidates = vec![PathBuf::from(SAMPLE_IMAGE), Path::new("data").join(SAMPLE_IMAGE)];

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(SAMPLE_IMAGE));
        candidates.push(exe_dir.join("data").join(SAMPLE_IMAGE));
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(SAMPLE_IMAGE));

    candidates
        .into_iter()
        .find(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from(SAMPLE_IMAGE))
}

/// `dir/name.ext` becomes `dir/name_transformed.pgm`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}
