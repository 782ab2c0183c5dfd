//! End-to-end checks through the public API.

use std::f64::consts::PI;

use spectro::filters::design::{design_highpass_fir, design_lowpass_fir, KERNEL_LENGTH};
use spectro::filters::{condition, FilterSpec, FilterType};
use spectro::pitch::harmonic_series;
use spectro::spectrum::{fft, ifft, FALLBACK_DB};
use spectro::{Config, ConfigOverrides, SpectroError, SpectrogramPipeline};

const SAMPLE_RATE: f64 = 44100.0;

fn tone(freq: f64, n_samples: usize) -> Vec<f64> {
    (0..n_samples)
        .map(|i| (2.0 * PI * freq * i as f64 / SAMPLE_RATE).sin())
        .collect()
}

fn pipeline(overrides: ConfigOverrides) -> SpectrogramPipeline {
    let config = Config::with_overrides(overrides).expect("valid config");
    SpectrogramPipeline::new(config).expect("pipeline builds")
}

#[test]
fn frame_count_for_20000_samples() {
    let p = pipeline(ConfigOverrides {
        fft_size: Some(2048),
        ..Default::default()
    });

    let analysis = p.analyze(&tone(440.0, 20000)).unwrap();
    assert_eq!(analysis.spectrogram.num_frames(), 18);
    assert_eq!(analysis.spectrogram.num_bins(), 1024);
}

#[test]
fn buffer_shorter_than_fft_size_is_not_an_error() {
    let p = pipeline(ConfigOverrides {
        fft_size: Some(4096),
        filter_type: Some(FilterType::Lowpass),
        filter_cutoffs: Some(vec![1000.0]),
        ..Default::default()
    });

    let analysis = p.analyze(&tone(440.0, 4000)).unwrap();
    assert_eq!(analysis.spectrogram.num_frames(), 0);
    assert_eq!(analysis.spectrogram.db_at(0, 0), FALLBACK_DB);
}

#[test]
fn fft_rejects_length_six() {
    let err = fft(&[0.0; 6]).unwrap_err();
    assert!(matches!(err, SpectroError::NonPowerOfTwo(6)));
    assert!(ifft(&vec![Default::default(); 6]).is_err());
}

#[test]
fn bandpass_with_one_cutoff_is_identity() {
    let signal = tone(3000.0, 5000);
    let spec = FilterSpec::new(FilterType::Bandpass, vec![2000.0]);
    assert_eq!(condition(&signal, &spec, SAMPLE_RATE), signal);
}

#[test]
fn highpass_plus_lowpass_is_unit_impulse() {
    for cutoff in [100.0, 1000.0, 8000.0] {
        let lp = design_lowpass_fir(cutoff, SAMPLE_RATE);
        let hp = design_highpass_fir(cutoff, SAMPLE_RATE);

        for i in 0..KERNEL_LENGTH {
            let expected = if i == KERNEL_LENGTH / 2 { 1.0 } else { 0.0 };
            assert!((lp[i] + hp[i] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn pitch_of_a440() {
    let p = pipeline(ConfigOverrides {
        f_min: Some(50.0),
        f_max: Some(2000.0),
        ..Default::default()
    });

    let f0 = p.detect_pitch(&tone(440.0, 22050));
    assert!((f0 - 440.0).abs() <= 5.0, "Detected {} Hz", f0);
}

#[test]
fn harmonics_of_100_hz() {
    assert_eq!(harmonic_series(100.0, 550.0), vec![200.0, 300.0, 400.0, 500.0]);
}

#[test]
fn harmonic_tone_reports_fundamental_and_series() {
    let signal: Vec<f64> = (0..22050)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * PI * 200.0 * t).sin() + 0.5 * (2.0 * PI * 400.0 * t).sin() + 0.25 * (2.0 * PI * 600.0 * t).sin()
        })
        .collect();

    let p = pipeline(ConfigOverrides {
        f_min: Some(60.0),
        f_max: Some(1100.0),
        show_harmonics: Some(true),
        ..Default::default()
    });

    let report = p.run(&signal).unwrap();
    let pitch = report.pitch.expect("harmonics enabled");
    assert!((pitch.fundamental - 200.0).abs() < 1.0, "Detected {} Hz", pitch.fundamental);
    assert_eq!(pitch.harmonics.len(), 4);
    assert!(report.analysis.spectrogram.num_frames() > 0);
}

#[test]
fn config_from_toml_drives_pipeline() {
    let config = Config::from_toml_str(
        r#"
        fft_size = 1024
        scale_type = "mel"
        f_min = 80.0
        f_max = 8000.0
        window_type = "cosine"
        "#,
    )
    .unwrap();
    let p = SpectrogramPipeline::new(config).unwrap();

    let bin_freq = SAMPLE_RATE / 1024.0;
    let range = p.bin_range();
    assert_eq!(range.start, (80.0 / bin_freq) as usize);
    assert_eq!(range.end, (8000.0 / bin_freq) as usize);

    let ticks = p.ticks(1);
    assert_eq!(ticks, vec![80.0, 8000.0]);
}
