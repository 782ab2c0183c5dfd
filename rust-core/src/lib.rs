//! Spectro - Spectrogram and Pitch Analysis Core
//!
//! Band-limits a captured mono buffer, frames it into a dB spectrogram on a
//! linear or mel axis, and estimates the fundamental and its harmonics.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod filters;
pub mod spectrum;
pub mod pitch;
pub mod pipeline;
pub mod render;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectroError};
pub use filters::{FilterSpec, FilterType, FirFilter, WindowType};
pub use pipeline::{Analysis, Config, ConfigOverrides, PipelineReport, SpectrogramPipeline};
pub use pitch::PitchEstimate;
pub use render::{ColorMap, ColorMapRegistry, RenderRequest, Renderer, Rgb};
pub use spectrum::{ScaleType, Spectrogram};
