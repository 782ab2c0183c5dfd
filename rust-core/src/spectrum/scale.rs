//! Frequency axis mapping (linear Hz or Mel)

use serde::Deserialize;

/// Mel scale constant for the natural-log form
pub const MEL_FACTOR: f64 = 1127.01048;

/// Mel break frequency in Hz
pub const MEL_BREAK_HZ: f64 = 700.0;

/// Frequency axis layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Mel,
}

/// mel(f) = 1127.01048·ln(f/700 + 1)
#[inline]
pub fn hz_to_mel(hz: f64) -> f64 {
    MEL_FACTOR * (hz / MEL_BREAK_HZ + 1.0).ln()
}

/// f(m) = 700·(e^(m/1127.01048) - 1)
#[inline]
pub fn mel_to_hz(mel: f64) -> f64 {
    MEL_BREAK_HZ * ((mel / MEL_FACTOR).exp() - 1.0)
}

impl ScaleType {
    /// Map Hz onto this axis' native unit
    pub fn to_scale(&self, hz: f64) -> f64 {
        match self {
            ScaleType::Linear => hz,
            ScaleType::Mel => hz_to_mel(hz),
        }
    }

    /// Inverse of [`to_scale`](Self::to_scale)
    pub fn from_scale(&self, value: f64) -> f64 {
        match self {
            ScaleType::Linear => value,
            ScaleType::Mel => mel_to_hz(value),
        }
    }

    /// Frequency at fractional axis position `t` (0 = f_min, 1 = f_max)
    pub fn position_to_hz(&self, t: f64, f_min: f64, f_max: f64) -> f64 {
        let lo = self.to_scale(f_min);
        let hi = self.to_scale(f_max);
        self.from_scale(lo + t * (hi - lo))
    }

    /// Fractional axis position of `hz` (0 = f_min, 1 = f_max)
    pub fn hz_to_position(&self, hz: f64, f_min: f64, f_max: f64) -> f64 {
        let lo = self.to_scale(f_min);
        let hi = self.to_scale(f_max);
        if hi == lo {
            return 0.0;
        }
        (self.to_scale(hz) - lo) / (hi - lo)
    }
}

/// Generate `count` ascending tick frequencies from `f_min` to `f_max`
///
/// Ticks are evenly spaced on the chosen axis; counts below 2 are raised
/// to 2 so both endpoints are always present.
pub fn generate_ticks(count: usize, scale: ScaleType, f_min: f64, f_max: f64) -> Vec<f64> {
    let count = count.max(2);
    let last = (count - 1) as f64;

    (0..count)
        .map(|i| {
            if i == 0 {
                f_min
            } else if i == count - 1 {
                f_max
            } else {
                scale.position_to_hz(i as f64 / last, f_min, f_max)
            }
        })
        .collect()
}
