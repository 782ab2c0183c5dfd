//! Recursive radix-2 FFT
//!
//! Decimation in time: the even and odd halves are transformed
//! independently and recombined with twiddles e^(-2πik/N). Lengths must be
//! powers of two; anything else is rejected rather than padded.

use crate::error::{Result, SpectroError};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Floor added to magnitudes before taking log10
pub const MAGNITUDE_EPSILON: f64 = 1e-12;

fn check_length(n: usize) -> Result<()> {
    if n <= 1 || n.is_power_of_two() {
        Ok(())
    } else {
        Err(SpectroError::NonPowerOfTwo(n))
    }
}

/// Forward transform of a real sequence
///
/// # Returns
/// N complex bins; bin k < N/2 sits at k·sample_rate/N
pub fn fft(input: &[f64]) -> Result<Vec<Complex64>> {
    check_length(input.len())?;
    let complex: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    Ok(transform_all(&complex))
}

/// Inverse transform, scaled by 1/N
///
/// Uses the conjugation identity ifft(X) = conj(fft(conj(X)))/N.
pub fn ifft(spectrum: &[Complex64]) -> Result<Vec<Complex64>> {
    check_length(spectrum.len())?;
    let n = spectrum.len() as f64;
    let conjugated: Vec<Complex64> = spectrum.iter().map(|c| c.conj()).collect();

    Ok(transform_all(&conjugated)
        .into_iter()
        .map(|c| c.conj() / n)
        .collect())
}

fn transform_all(input: &[Complex64]) -> Vec<Complex64> {
    let mut output = vec![Complex64::new(0.0, 0.0); input.len()];
    if !input.is_empty() {
        transform(input, 1, &mut output);
    }
    output
}

/// Transform `input[0], input[stride], input[2·stride], ...` into `out`
///
/// `out.len()` is the sub-problem size. The even half lands in the lower
/// half of `out`, the odd half in the upper, then a butterfly pass combines
/// them in place.
fn transform(input: &[Complex64], stride: usize, out: &mut [Complex64]) {
    let n = out.len();
    if n == 1 {
        out[0] = input[0];
        return;
    }

    let half = n / 2;
    {
        let (evens, odds) = out.split_at_mut(half);
        transform(input, stride * 2, evens);
        transform(&input[stride..], stride * 2, odds);
    }

    for k in 0..half {
        let twiddle = Complex64::from_polar(1.0, -2.0 * PI * k as f64 / n as f64);
        let even = out[k];
        let odd = twiddle * out[k + half];
        out[k] = even + odd;
        out[k + half] = even - odd;
    }
}

/// Per-frame FFT front end for a fixed frame size
#[derive(Debug, Clone)]
pub struct FftEngine {
    fft_size: usize,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (power of two, at least 2)
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size < 2 || !fft_size.is_power_of_two() {
            return Err(SpectroError::NonPowerOfTwo(fft_size));
        }
        Ok(Self { fft_size })
    }

    /// Compute magnitude |X[k]| for the non-negative bins k = 0..N/2
    ///
    /// `frame` must hold exactly `fft_size` samples.
    pub fn compute_magnitude(&self, frame: &[f64]) -> Result<Vec<f64>> {
        debug_assert_eq!(frame.len(), self.fft_size);
        let spectrum = fft(frame)?;

        Ok(spectrum[..frame.len() / 2].iter().map(|c| c.norm()).collect())
    }

    /// Compute magnitude in dB: 20·log10(|X[k]| + 1e-12)
    pub fn compute_magnitude_db(&self, frame: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .compute_magnitude(frame)?
            .into_iter()
            .map(magnitude_to_db)
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of retained bins (N/2, DC up to just below Nyquist)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }

    /// Frequency of every retained bin in Hz
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_to_hz(bin, sample_rate))
            .collect()
    }
}

/// Convert a linear magnitude to dB with the log(0) guard
#[inline]
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * (magnitude + MAGNITUDE_EPSILON).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random signal in [-1, 1)
    fn test_signal(n: usize) -> Vec<f64> {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 11) as f64 / (1u64 << 52) as f64 - 1.0
            })
            .collect()
    }

    #[test]
    fn test_round_trip_all_sizes() {
        for k in 0..=13 {
            let n = 1usize << k;
            let signal = test_signal(n);

            let spectrum = fft(&signal).unwrap();
            let restored = ifft(&spectrum).unwrap();

            assert_eq!(restored.len(), n);
            for (i, (orig, back)) in signal.iter().zip(restored.iter()).enumerate() {
                assert!((orig - back.re).abs() < 1e-5, "n={} i={}: {} vs {}", n, i, orig, back.re);
                assert!(back.im.abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_parseval() {
        let n = 4096;
        let signal = test_signal(n);
        let spectrum = fft(&signal).unwrap();

        let time_energy: f64 = signal.iter().map(|x| x * x).sum();
        let freq_energy: f64 = spectrum.iter().map(|c| c.norm_sqr()).sum::<f64>() / n as f64;

        assert!((time_energy - freq_energy).abs() < 1e-6 * time_energy);
    }

    #[test]
    fn test_non_power_of_two_rejected() {
        let result = fft(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(matches!(result, Err(SpectroError::NonPowerOfTwo(6))));

        assert!(FftEngine::new(6).is_err());
        assert!(FftEngine::new(1).is_err());
        assert!(FftEngine::new(0).is_err());
    }

    #[test]
    fn test_base_case() {
        let spectrum = fft(&[0.75]).unwrap();
        assert_eq!(spectrum, vec![Complex64::new(0.75, 0.0)]);
        assert!(fft(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_matches_rustfft() {
        let n = 1024;
        let signal = test_signal(n);
        let ours = fft(&signal).unwrap();

        let mut reference: Vec<rustfft::num_complex::Complex<f64>> = signal
            .iter()
            .map(|&x| rustfft::num_complex::Complex::new(x, 0.0))
            .collect();
        let mut planner = rustfft::FftPlanner::<f64>::new();
        planner.plan_fft_forward(n).process(&mut reference);

        for (k, (a, b)) in ours.iter().zip(reference.iter()).enumerate() {
            assert!((a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9, "bin {}", k);
        }
    }

    #[test]
    fn test_fft_sine_wave() {
        let engine = FftEngine::new(1024).unwrap();
        let sample_rate = 48000.0;

        // Exactly on bin 64
        let freq = engine.bin_to_hz(64, sample_rate);
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate).sin())
            .collect();

        let spectrum = engine.compute_magnitude(&signal).unwrap();
        assert_eq!(spectrum.len(), 512);

        let (peak_bin, &peak_mag) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();

        assert_eq!(peak_bin, 64);
        assert!((peak_mag - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_db_is_finite() {
        let engine = FftEngine::new(256).unwrap();
        let db = engine.compute_magnitude_db(&vec![0.0; 256]).unwrap();

        assert!(db.iter().all(|v| v.is_finite()));
        assert!((db[0] - (-240.0)).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_axis() {
        let engine = FftEngine::new(1024).unwrap();
        let freqs = engine.frequency_axis_hz(48000.0);

        assert_eq!(freqs.len(), 512);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[1] - 46.875).abs() < 1e-10);
    }
}
