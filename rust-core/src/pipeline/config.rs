//! Analysis configuration
//!
//! A `Config` is built once by laying caller overrides over the defaults
//! and validated; it is never mutated afterwards.

use crate::error::{Result, SpectroError};
use crate::filters::design::{FilterSpec, FilterType};
use crate::filters::windows::WindowType;
use crate::spectrum::scale::ScaleType;
use serde::Deserialize;

/// Complete, validated analysis settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Frequency axis layout
    pub scale_type: ScaleType,

    /// Lowest displayed / searched frequency in Hz
    pub f_min: f64,

    /// Highest displayed / searched frequency in Hz
    pub f_max: f64,

    /// Frame length (power of two, at least 2)
    pub fft_size: usize,

    /// Analysis window
    pub window_type: WindowType,

    /// Display gain in dB
    pub gain_db: f64,

    /// Displayed dynamic range in dB
    pub range_db: f64,

    /// Band-limiting filter
    pub filter_type: FilterType,

    /// Filter cutoffs in Hz (1 for lowpass/highpass, 2 for bandpass/notch)
    pub filter_cutoffs: Vec<f64>,

    /// Report the fundamental from `run`
    pub detect_pitch: bool,

    /// Report the harmonic series from `run`
    pub show_harmonics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            scale_type: ScaleType::Linear,
            f_min: 0.0,
            f_max: 22050.0,
            fft_size: 512,
            window_type: WindowType::Hanning,
            gain_db: 20.0,
            range_db: 80.0,
            filter_type: FilterType::None,
            filter_cutoffs: Vec::new(),
            detect_pitch: false,
            show_harmonics: false,
        }
    }
}

/// Partial caller input; every `Some` replaces the default
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub sample_rate: Option<f64>,
    pub scale_type: Option<ScaleType>,
    pub f_min: Option<f64>,
    pub f_max: Option<f64>,
    pub fft_size: Option<usize>,
    pub window_type: Option<WindowType>,
    pub gain_db: Option<f64>,
    pub range_db: Option<f64>,
    pub filter_type: Option<FilterType>,
    pub filter_cutoffs: Option<Vec<f64>>,
    pub detect_pitch: Option<bool>,
    pub show_harmonics: Option<bool>,
}

impl Config {
    /// Merge `overrides` onto the defaults and validate
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            sample_rate: overrides.sample_rate.unwrap_or(defaults.sample_rate),
            scale_type: overrides.scale_type.unwrap_or(defaults.scale_type),
            f_min: overrides.f_min.unwrap_or(defaults.f_min),
            f_max: overrides.f_max.unwrap_or(defaults.f_max),
            fft_size: overrides.fft_size.unwrap_or(defaults.fft_size),
            window_type: overrides.window_type.unwrap_or(defaults.window_type),
            gain_db: overrides.gain_db.unwrap_or(defaults.gain_db),
            range_db: overrides.range_db.unwrap_or(defaults.range_db),
            filter_type: overrides.filter_type.unwrap_or(defaults.filter_type),
            filter_cutoffs: overrides.filter_cutoffs.unwrap_or(defaults.filter_cutoffs),
            detect_pitch: overrides.detect_pitch.unwrap_or(defaults.detect_pitch),
            show_harmonics: overrides.show_harmonics.unwrap_or(defaults.show_harmonics),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML overrides and merge them onto the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: ConfigOverrides = toml::from_str(content)?;
        Self::with_overrides(overrides)
    }

    /// Check the invariants every analysis relies on
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate > 0.0) {
            return Err(invalid(format!("sample_rate must be positive (got {})", self.sample_rate)));
        }
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(invalid(format!("fft_size must be a power of two >= 2 (got {})", self.fft_size)));
        }
        if !(self.f_min >= 0.0) {
            return Err(invalid(format!("f_min must be non-negative (got {})", self.f_min)));
        }
        if !(self.f_min < self.f_max) {
            return Err(invalid(format!("f_min ({}) must be below f_max ({})", self.f_min, self.f_max)));
        }
        if self.scale_type == ScaleType::Mel && self.f_min <= 0.0 {
            return Err(invalid("f_min must be positive on the mel scale".to_string()));
        }
        if !(self.range_db > 0.0) {
            return Err(invalid(format!("range_db must be positive (got {})", self.range_db)));
        }
        Ok(())
    }

    /// Filter request derived from the filter fields
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::new(self.filter_type, self.filter_cutoffs.clone())
    }

    /// Width of one FFT bin in Hz: (sr/2)/(fft_size/2)
    pub fn bin_frequency(&self) -> f64 {
        (self.sample_rate / 2.0) / (self.fft_size / 2) as f64
    }
}

fn invalid(message: String) -> SpectroError {
    SpectroError::InvalidConfig(message)
}
