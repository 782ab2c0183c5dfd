//! Configured end-to-end analysis

pub mod config;
pub mod processor;

pub use config::{Config, ConfigOverrides};
pub use processor::{Analysis, PipelineReport, SpectrogramPipeline};
