//! Pipeline conversions module
//!
//! This module contains the orchestration of a single rotate-and-scale run:
//! decode, canvas solve, warp and encode.

mod config;
mod transform;

#[cfg(test)]
mod tests;

pub use config::{TransformConfig, TransformConfigBuilder};
pub use transform::{TransformPipeline, TransformReport};
