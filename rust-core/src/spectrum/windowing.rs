//! Windowing for spectrogram frames
//!
//! Weights are computed once per frame size and reused for every frame.

use crate::filters::windows::{WindowType, generate_window};

/// Precomputed analysis window
#[derive(Debug, Clone)]
pub struct Window {
    window_type: WindowType,
    weights: Vec<f64>,
}

impl Window {
    pub fn new(window_type: WindowType, length: usize) -> Self {
        Self {
            window_type,
            weights: generate_window(window_type, length),
        }
    }

    /// Copy `frame` into `out`, weighted
    ///
    /// `WindowType::None` copies the samples untouched.
    pub fn apply_into(&self, frame: &[f64], out: &mut [f64]) {
        if self.window_type == WindowType::None {
            out.copy_from_slice(frame);
            return;
        }

        for ((o, &s), &w) in out.iter_mut().zip(frame).zip(&self.weights) {
            *o = s * w;
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Apply window to signal
///
/// # Returns
/// Windowed copy of `signal`
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = Window::new(window_type, signal.len());
    let mut out = vec![0.0; signal.len()];
    window.apply_into(signal, &mut out);
    out
}
