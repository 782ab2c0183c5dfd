//! Fundamental frequency and harmonic series estimation

pub mod autocorrelation;
pub mod harmonics;

pub use autocorrelation::{autocorrelation, detect_fundamental, lag_range};
pub use harmonics::{harmonic_series, MAX_HARMONIC};

/// Fundamental plus its harmonics, in Hz
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchEstimate {
    /// Detected fundamental (0.0 when nothing was found)
    pub fundamental: f64,

    /// Integer multiples 2·f0..10·f0 up to f_max, ascending
    pub harmonics: Vec<f64>,
}

impl PitchEstimate {
    pub fn new(fundamental: f64, harmonics: Vec<f64>) -> Self {
        Self {
            fundamental,
            harmonics,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.fundamental > 0.0
    }
}
