//! FIR filter design and signal conditioning

pub mod windows;
pub mod design;
pub mod fir;

pub use windows::{WindowType, generate_window};
pub use design::{FilterSpec, FilterType, KERNEL_LENGTH, design_lowpass_fir, design_highpass_fir, design_bandpass_fir, design_notch_fir};
pub use fir::{FirFilter, condition};
