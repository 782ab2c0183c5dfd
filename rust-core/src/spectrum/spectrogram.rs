//! Spectrogram assembly
//!
//! Frames the signal with 50% overlap, windows each frame, runs the FFT and
//! stores the dB magnitude of the non-negative bins, frame-major.

use super::fft::FftEngine;
use super::windowing::Window;
use crate::error::{Result, SpectroError};
use crate::filters::windows::WindowType;
use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Value reported wherever no frame data exists for a requested bin
pub const FALLBACK_DB: f64 = -100.0;

/// Hop between consecutive frames (50% overlap)
pub fn hop_size(fft_size: usize) -> usize {
    (fft_size / 2).max(1)
}

/// Number of whole frames that fit in `length` samples
///
/// floor((length - fft_size) / hop) + 1, or 0 when the signal is shorter
/// than one frame.
pub fn frame_count(length: usize, fft_size: usize) -> usize {
    if length < fft_size || fft_size == 0 {
        return 0;
    }
    (length - fft_size) / hop_size(fft_size) + 1
}

/// Decibel magnitudes indexed `[frame][bin]`
///
/// Frames run forward in time; bins ascend from DC to just below Nyquist.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    data: Array2<f64>,
}

impl Spectrogram {
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn num_frames(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_bins(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// dB value at `(frame, bin)`, or [`FALLBACK_DB`] when out of range
    pub fn db_at(&self, frame: usize, bin: usize) -> f64 {
        self.data.get((frame, bin)).copied().unwrap_or(FALLBACK_DB)
    }

    /// One frame's bins
    pub fn frame(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.num_frames()).then(|| self.data.index_axis(Axis(0), index))
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}

/// Frames, windows and transforms a conditioned signal
#[derive(Debug, Clone)]
pub struct SpectrogramBuilder {
    fft_engine: FftEngine,
    window: Window,
}

impl SpectrogramBuilder {
    /// Create a builder for a frame size and window
    ///
    /// # Errors
    /// `NonPowerOfTwo` if `fft_size` is not a power of two ≥ 2
    pub fn new(fft_size: usize, window_type: WindowType) -> Result<Self> {
        let fft_engine = FftEngine::new(fft_size)?;
        let window = Window::new(window_type, fft_size);

        Ok(Self { fft_engine, window })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_engine.fft_size()
    }

    pub fn hop_size(&self) -> usize {
        hop_size(self.fft_size())
    }

    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }

    pub fn window_type(&self) -> WindowType {
        self.window.window_type()
    }

    /// Build the spectrogram of `signal`
    ///
    /// Signals shorter than one frame give a zero-frame matrix.
    pub fn build(&self, signal: &[f64]) -> Result<Spectrogram> {
        self.build_with(signal, None)
    }

    /// Like [`build`](Self::build), checking `cancel` before each frame
    ///
    /// # Errors
    /// `Cancelled` once the flag is observed set
    pub fn build_cancellable(&self, signal: &[f64], cancel: &AtomicBool) -> Result<Spectrogram> {
        self.build_with(signal, Some(cancel))
    }

    fn build_with(&self, signal: &[f64], cancel: Option<&AtomicBool>) -> Result<Spectrogram> {
        let fft_size = self.fft_size();
        let hop = self.hop_size();
        let num_bins = self.num_bins();
        let num_frames = frame_count(signal.len(), fft_size);

        log::debug!(
            "Building spectrogram: {} samples, fft_size={}, hop={}, {} frames, window={:?}",
            signal.len(), fft_size, hop, num_frames, self.window.window_type()
        );

        // Pre-allocated; each frame writes only its own row
        let mut data = vec![0.0; num_frames * num_bins];

        data.par_chunks_mut(num_bins.max(1))
            .enumerate()
            .try_for_each_init(
                || vec![0.0; fft_size],
                |scratch, (frame_index, row)| -> Result<()> {
                    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                        return Err(SpectroError::Cancelled);
                    }

                    let start = frame_index * hop;
                    self.window.apply_into(&signal[start..start + fft_size], scratch);

                    let magnitudes = self.fft_engine.compute_magnitude_db(scratch)?;
                    row.copy_from_slice(&magnitudes);
                    Ok(())
                },
            )?;

        let data = Array2::from_shape_vec((num_frames, num_bins), data)?;
        Ok(Spectrogram::from_array(data))
    }
}

/// Build a spectrogram in one call
pub fn build_spectrogram(signal: &[f64], fft_size: usize, window_type: WindowType) -> Result<Spectrogram> {
    SpectrogramBuilder::new(fft_size, window_type)?.build(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(20000, 2048), 18);
        assert_eq!(frame_count(2048, 2048), 1);
        assert_eq!(frame_count(3071, 2048), 1);
        assert_eq!(frame_count(3072, 2048), 2);
        assert_eq!(frame_count(2047, 2048), 0);
        assert_eq!(frame_count(0, 2048), 0);
    }

    #[test]
    fn test_matrix_shape() {
        let signal = vec![0.1; 20000];
        let spectrogram = build_spectrogram(&signal, 2048, WindowType::Hanning).unwrap();

        assert_eq!(spectrogram.num_frames(), 18);
        assert_eq!(spectrogram.num_bins(), 1024);
    }

    #[test]
    fn test_short_signal_gives_empty_matrix() {
        let signal = vec![0.5; 1000];
        let spectrogram = build_spectrogram(&signal, 2048, WindowType::Hanning).unwrap();

        assert!(spectrogram.is_empty());
        assert_eq!(spectrogram.num_frames(), 0);
        assert_eq!(spectrogram.db_at(0, 10), FALLBACK_DB);
        assert!(spectrogram.frame(0).is_none());
    }

    #[test]
    fn test_peak_tracks_tone() {
        let sample_rate = 44100.0;
        let fft_size = 1024;
        let freq = 43.0 * sample_rate / fft_size as f64;
        let signal: Vec<f64> = (0..8192)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate).sin())
            .collect();

        let spectrogram = build_spectrogram(&signal, fft_size, WindowType::BlackmanHarris7).unwrap();

        for f in 0..spectrogram.num_frames() {
            let frame = spectrogram.frame(f).unwrap();
            let (peak_bin, _) = frame
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .unwrap();
            assert_eq!(peak_bin, 43, "frame {}", f);
        }
    }

    #[test]
    fn test_frames_match_single_frame_fft() {
        let signal: Vec<f64> = (0..600).map(|n| ((n * n) % 17) as f64 / 17.0 - 0.5).collect();
        let builder = SpectrogramBuilder::new(128, WindowType::Cosine).unwrap();
        let spectrogram = builder.build(&signal).unwrap();

        let engine = FftEngine::new(128).unwrap();
        let window = Window::new(WindowType::Cosine, 128);
        let mut scratch = vec![0.0; 128];

        for f in 0..spectrogram.num_frames() {
            let start = f * builder.hop_size();
            window.apply_into(&signal[start..start + 128], &mut scratch);
            let expected = engine.compute_magnitude_db(&scratch).unwrap();

            for (bin, &value) in expected.iter().enumerate() {
                assert_eq!(spectrogram.db_at(f, bin), value);
            }
        }
    }

    #[test]
    fn test_cancelled_build() {
        let builder = SpectrogramBuilder::new(256, WindowType::Hanning).unwrap();
        let cancel = AtomicBool::new(true);

        let result = builder.build_cancellable(&vec![0.0; 4096], &cancel);
        assert!(matches!(result, Err(SpectroError::Cancelled)));

        let cancel = AtomicBool::new(false);
        assert!(builder.build_cancellable(&vec![0.0; 4096], &cancel).is_ok());
    }

    #[test]
    fn test_out_of_range_bin_uses_fallback() {
        let spectrogram = build_spectrogram(&vec![0.0; 512], 256, WindowType::Hanning).unwrap();
        assert_eq!(spectrogram.num_bins(), 128);
        assert_eq!(spectrogram.db_at(0, 128), FALLBACK_DB);
        assert!(spectrogram.db_at(0, 5) < -200.0);
    }
}
