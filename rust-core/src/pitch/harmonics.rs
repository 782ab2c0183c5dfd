//! Harmonic series of a detected fundamental

/// Highest harmonic number reported
pub const MAX_HARMONIC: usize = 10;

/// Integer multiples n·f0 for n = 2..=10, stopping at the first one above
/// `f_max` (a multiple equal to `f_max` is kept)
pub fn harmonic_series(fundamental: f64, f_max: f64) -> Vec<f64> {
    if !(fundamental > 0.0) {
        return Vec::new();
    }

    (2..=MAX_HARMONIC)
        .map(|n| n as f64 * fundamental)
        .take_while(|&h| h <= f_max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonics_below_f_max() {
        assert_eq!(harmonic_series(100.0, 550.0), vec![200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_harmonic_equal_to_f_max_is_kept() {
        assert_eq!(harmonic_series(100.0, 500.0), vec![200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_at_most_nine_harmonics() {
        let harmonics = harmonic_series(10.0, 1e6);
        assert_eq!(harmonics.len(), 9);
        assert_eq!(harmonics[0], 20.0);
        assert_eq!(harmonics[8], 100.0);
    }

    #[test]
    fn test_undetected_fundamental() {
        assert!(harmonic_series(0.0, 1000.0).is_empty());
        assert!(harmonic_series(600.0, 1000.0).is_empty());
    }
}
