//! Window functions for spectral framing and FIR design
//!
//! Analysis windows are periodic (denominator N) so that overlapping frames
//! tile cleanly; the FIR taper is symmetric (denominator M-1).

use serde::Deserialize;
use std::f64::consts::PI;

/// Blackman-Harris 7-term coefficients c0..c6 (signs included)
pub const BLACKMAN_HARRIS_7: [f64; 7] = [
    0.2710514,
    -0.4332979392,
    0.2181229995,
    -0.06592544639,
    0.0108117421,
    -0.0007765848252,
    0.00001388721735,
];

/// Analysis window applied to each spectrogram frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Identity weighting (rectangular)
    None,

    /// w[i] = sin(πi/N)
    Cosine,

    /// w[i] = 0.5·(1 - cos(2πi/N))
    #[default]
    Hanning,

    /// 7-term Blackman-Harris: Σ c_j·cos(2πji/N)
    /// Sidelobes below -180 dB at the cost of a wide mainlobe
    #[serde(rename = "bh7")]
    BlackmanHarris7,
}

impl WindowType {
    /// Weight of sample `i` in a frame of length `n`
    #[inline]
    pub fn weight(&self, i: usize, n: usize) -> f64 {
        let n = n as f64;
        let i = i as f64;

        match self {
            WindowType::None => 1.0,
            WindowType::Cosine => (PI * i / n).sin(),
            WindowType::Hanning => 0.5 * (1.0 - (2.0 * PI * i / n).cos()),
            WindowType::BlackmanHarris7 => BLACKMAN_HARRIS_7
                .iter()
                .enumerate()
                .map(|(j, &c)| c * (2.0 * PI * j as f64 * i / n).cos())
                .sum(),
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[i] for i = 0..N-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    (0..length).map(|i| window_type.weight(i, length)).collect()
}

/// Symmetric Hamming taper used by the windowed-sinc designer
///
/// w[i] = 0.54 - 0.46·cos(2πi/(M-1))
pub fn hamming_symmetric(length: usize) -> Vec<f64> {
    if length < 2 {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    (0..length)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
        .collect()
}
