//! Signal conditioning by direct FIR convolution
//!
//! The kernel is centered on each output sample, so a symmetric kernel
//! introduces no delay. Taps that fall outside the buffer read as zero.

use super::design::FilterSpec;
use rayon::prelude::*;

/// FIR filter applied to a complete, already-captured buffer
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients h[k]
    coefficients: Vec<f64>,
}

impl FirFilter {
    /// Create a new FIR filter with given coefficients
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Design a filter from a spec
    ///
    /// # Returns
    /// `None` when the spec degrades to pass-through
    pub fn from_spec(spec: &FilterSpec, sample_rate: f64) -> Option<Self> {
        spec.design(sample_rate).map(Self::new)
    }

    /// Convolve a whole buffer
    ///
    /// y[n] = Σ h[k]·x[n + mid - k], dropping taps whose index leaves the buffer
    ///
    /// # Returns
    /// Filtered output (same length as input)
    pub fn process(&self, input: &[f64]) -> Vec<f64> {
        let mid = self.coefficients.len() / 2;

        (0..input.len())
            .into_par_iter()
            .map(|n| self.output_at(input, n, mid))
            .collect()
    }

    #[inline]
    fn output_at(&self, input: &[f64], n: usize, mid: usize) -> f64 {
        let mut acc = 0.0;
        for (k, &coeff) in self.coefficients.iter().enumerate() {
            // n + mid - k, skipping negatives and the tail past the end
            let Some(idx) = (n + mid).checked_sub(k) else {
                continue;
            };
            if let Some(&x) = input.get(idx) {
                acc += coeff * x;
            }
        }
        acc
    }

    /// Get filter coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Get filter length
    pub fn length(&self) -> usize {
        self.coefficients.len()
    }
}

/// Band-limit a buffer according to `spec`
///
/// Unconfigured or under-specified filters return the input unchanged.
pub fn condition(signal: &[f64], spec: &FilterSpec, sample_rate: f64) -> Vec<f64> {
    match FirFilter::from_spec(spec, sample_rate) {
        Some(filter) => filter.process(signal),
        None => signal.to_vec(),
    }
}
