//! Autocorrelation pitch detection
//!
//! Picks the lag in [⌊sr/f_max⌋, ⌊sr/f_min⌋] with the strictly largest
//! unnormalized autocorrelation. On ties the lowest lag (highest candidate
//! frequency) wins.

use rayon::prelude::*;
use std::ops::RangeInclusive;

/// Raw autocorrelation Σ x[i]·x[i+lag] over every valid i
pub fn autocorrelation(signal: &[f64], lag: usize) -> f64 {
    if lag >= signal.len() {
        return 0.0;
    }

    signal[..signal.len() - lag]
        .iter()
        .zip(&signal[lag..])
        .map(|(a, b)| a * b)
        .sum()
}

/// Candidate lags for a frequency window: [⌊sr/f_max⌋, ⌊sr/f_min⌋]
///
/// `min_lag` never drops below 1. With `f_min == 0` the window has no
/// upper bound of its own, so it stops at `max(signal_len - 1, min_lag)`.
/// Lags past the end of the signal stay in range and score 0.
///
/// # Returns
/// `None` when the window is degenerate (min_lag > max_lag)
pub fn lag_range(sample_rate: f64, f_min: f64, f_max: f64, signal_len: usize) -> Option<RangeInclusive<usize>> {
    if !(sample_rate > 0.0) || !(f_max > 0.0) {
        return None;
    }

    let min_lag = ((sample_rate / f_max).floor() as usize).max(1);
    let max_lag = if f_min > 0.0 {
        (sample_rate / f_min).floor() as usize
    } else {
        signal_len.saturating_sub(1).max(min_lag)
    };

    (min_lag <= max_lag).then_some(min_lag..=max_lag)
}

/// Estimate the fundamental frequency of `signal`
///
/// Every lag in the window is scanned, so the cost is O(len · lags).
/// With `f_min == 0` that is every lag up to `len - 1`, i.e. O(len²).
///
/// # Returns
/// Fundamental in Hz, or 0.0 when the lag range is degenerate
pub fn detect_fundamental(signal: &[f64], sample_rate: f64, f_min: f64, f_max: f64) -> f64 {
    let Some(lags) = lag_range(sample_rate, f_min, f_max, signal.len()) else {
        log::debug!(
            "Pitch detection skipped: empty lag range (sr={}, f_min={}, f_max={}, len={})",
            sample_rate, f_min, f_max, signal.len()
        );
        return 0.0;
    };
    let (min_lag, max_lag) = lags.into_inner();

    // Lags that still overlap the signal are evaluated in parallel; the
    // reduction keeps the left operand on ties, so the first maximum wins
    let last_overlapping = max_lag.min(signal.len().saturating_sub(1));
    let mut best = (min_lag..=last_overlapping)
        .into_par_iter()
        .map(|lag| (lag, autocorrelation(signal, lag)))
        .reduce_with(|a, b| if b.1 > a.1 { b } else { a });

    // Every lag from the signal length on scores 0; only the first can win
    if max_lag >= signal.len() {
        let tail = (min_lag.max(signal.len()), 0.0);
        best = match best {
            Some(found) if found.1 >= tail.1 => Some(found),
            _ => Some(tail),
        };
    }

    let Some((best_lag, best_score)) = best else {
        return 0.0;
    };

    let fundamental = sample_rate / best_lag as f64;
    log::debug!("Pitch: best lag {} (score {:.4}) -> {:.2} Hz", best_lag, best_score, fundamental);
    fundamental
}
