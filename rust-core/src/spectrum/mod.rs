//! Spectral analysis: FFT, framing and frequency axes

pub mod fft;
pub mod windowing;
pub mod spectrogram;
pub mod scale;

pub use fft::{FftEngine, fft, ifft};
pub use windowing::{Window, apply_window};
pub use spectrogram::{Spectrogram, SpectrogramBuilder, FALLBACK_DB, build_spectrogram, frame_count};
pub use scale::{ScaleType, hz_to_mel, mel_to_hz, generate_ticks};
