use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Unable to open input image: {0}")]
    InputNotFound(String),

    #[error("Failed to create output file: {0}")]
    OutputWriteFailure(String),

    #[error("Failed to decode grayscale image: {0}")]
    DecodeFailure(String),

    #[error("Failed to encode output image: {0}")]
    EncodeFailure(String),

    #[error("Accelerator error: {0}")]
    AcceleratorFailure(String),

    #[error("Invalid transform geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown failure: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TransformError {
    fn from(err: anyhow::Error) -> Self {
        TransformError::AcceleratorFailure(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
