//! Output format types

use std::path::Path;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

/// Encoded file format of the transformed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Binary graymap (`P5`)
    #[default]
    Pgm,
    /// 8-bit grayscale TIFF
    Tiff,
    /// 8-bit grayscale PNG
    Png,
}

impl OutputFormat {
    /// Picks the format from the file extension, falling back to PGM.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("tif" | "tiff") => OutputFormat::Tiff,
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Pgm,
        }
    }
}
