//! FIR filter design using the windowed-sinc method
//!
//! Every kernel is built from one Hamming-windowed lowpass prototype:
//! highpass and notch by spectral inversion, bandpass as a difference of
//! two lowpasses.

use super::windows::hamming_symmetric;
use num_complex::Complex64;
use serde::Deserialize;
use std::f64::consts::PI;

/// Kernel length M (odd, so the kernel is symmetric about its center tap)
pub const KERNEL_LENGTH: usize = 101;

/// Band-limiting mode applied before framing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    None,
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

impl FilterType {
    /// Number of cutoff frequencies the filter needs
    pub fn required_cutoffs(&self) -> usize {
        match self {
            FilterType::None => 0,
            FilterType::Lowpass | FilterType::Highpass => 1,
            FilterType::Bandpass | FilterType::Notch => 2,
        }
    }
}

/// Filter request: type plus cutoffs in Hz
///
/// Bandpass and notch read `cutoffs[0]` as the lower edge and
/// `cutoffs[1]` as the upper edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub filter_type: FilterType,
    pub cutoffs: Vec<f64>,
}

impl FilterSpec {
    pub fn new(filter_type: FilterType, cutoffs: Vec<f64>) -> Self {
        Self {
            filter_type,
            cutoffs,
        }
    }

    /// True when the spec cannot produce a kernel and the signal
    /// should pass through untouched
    pub fn is_passthrough(&self) -> bool {
        self.filter_type == FilterType::None
            || self.cutoffs.len() < self.filter_type.required_cutoffs()
    }

    /// Design the kernel for this spec
    ///
    /// # Returns
    /// `None` for `FilterType::None` or when too few cutoffs are supplied
    pub fn design(&self, sample_rate: f64) -> Option<Vec<f64>> {
        if self.is_passthrough() {
            return None;
        }

        let kernel = match self.filter_type {
            FilterType::None => return None,
            FilterType::Lowpass => design_lowpass_fir(self.cutoffs[0], sample_rate),
            FilterType::Highpass => design_highpass_fir(self.cutoffs[0], sample_rate),
            FilterType::Bandpass => {
                design_bandpass_fir(self.cutoffs[0], self.cutoffs[1], sample_rate)
            }
            FilterType::Notch => design_notch_fir(self.cutoffs[0], self.cutoffs[1], sample_rate),
        };

        Some(kernel)
    }
}

/// Unit impulse at the kernel center
fn unit_impulse(length: usize) -> Vec<f64> {
    let mut delta = vec![0.0; length];
    delta[length / 2] = 1.0;
    delta
}

/// Design a lowpass FIR filter
///
/// # Algorithm
/// 1. Ideal response h[n] = sin(2π·fc·n)/(π·n), with 2·fc at n = 0
/// 2. Multiply by a symmetric Hamming window of the same length
///
/// # Arguments
/// * `cutoff_hz` - Cutoff frequency in Hz
/// * `sample_rate` - Sample rate in Hz
pub fn design_lowpass_fir(cutoff_hz: f64, sample_rate: f64) -> Vec<f64> {
    let fc = cutoff_hz / sample_rate;
    let window = hamming_symmetric(KERNEL_LENGTH);
    let mid = (KERNEL_LENGTH / 2) as isize;

    window
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let n = i as isize - mid;
            let h_ideal = if n == 0 {
                2.0 * fc
            } else {
                let n = n as f64;
                (2.0 * PI * fc * n).sin() / (PI * n)
            };
            h_ideal * w
        })
        .collect()
}

/// Design a highpass FIR filter (impulse minus lowpass)
pub fn design_highpass_fir(cutoff_hz: f64, sample_rate: f64) -> Vec<f64> {
    let lowpass = design_lowpass_fir(cutoff_hz, sample_rate);
    unit_impulse(KERNEL_LENGTH)
        .iter()
        .zip(lowpass.iter())
        .map(|(d, h)| d - h)
        .collect()
}

/// Design a bandpass FIR filter: lowpass(high) - lowpass(low)
pub fn design_bandpass_fir(low_hz: f64, high_hz: f64, sample_rate: f64) -> Vec<f64> {
    let upper = design_lowpass_fir(high_hz, sample_rate);
    let lower = design_lowpass_fir(low_hz, sample_rate);
    upper.iter().zip(lower.iter()).map(|(u, l)| u - l).collect()
}

/// Design a notch (band-stop) FIR filter: impulse minus bandpass
pub fn design_notch_fir(low_hz: f64, high_hz: f64, sample_rate: f64) -> Vec<f64> {
    let bandpass = design_bandpass_fir(low_hz, high_hz, sample_rate);
    unit_impulse(KERNEL_LENGTH)
        .iter()
        .zip(bandpass.iter())
        .map(|(d, h)| d - h)
        .collect()
}

/// Calculate frequency response at given frequencies
///
/// # Arguments
/// * `h` - Filter coefficients
/// * `frequencies_hz` - Evaluation frequencies in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Complex frequency response H(e^jω)
pub fn frequency_response(h: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<Complex64> {
    frequencies_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / sample_rate;
            h.iter()
                .enumerate()
                .map(|(n, &h_n)| h_n * Complex64::from_polar(1.0, -omega * n as f64))
                .sum()
        })
        .collect()
}

/// Calculate magnitude response in dB
pub fn magnitude_response_db(h: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<f64> {
    frequency_response(h, frequencies_hz, sample_rate)
        .iter()
        .map(|c| 20.0 * (c.norm() + 1e-12).log10())
        .collect()
}
