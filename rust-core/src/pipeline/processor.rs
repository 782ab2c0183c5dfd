//! Pipeline orchestration: conditioning, framing and pitch reporting
//!
//! The kernel and window table are built once from the immutable `Config`
//! and reused by every call.

use super::config::Config;
use crate::error::Result;
use crate::filters::fir::FirFilter;
use crate::pitch::{PitchEstimate, detect_fundamental, harmonic_series};
use crate::render::{ColorMap, RenderRequest, Renderer};
use crate::spectrum::scale::generate_ticks;
use crate::spectrum::spectrogram::{Spectrogram, SpectrogramBuilder};
use std::borrow::Cow;
use std::ops::Range;
use std::sync::atomic::AtomicBool;

/// Spectrogram plus the bins that fall inside [f_min, f_max]
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub spectrogram: Spectrogram,

    /// [i_min, i_max) with i = ⌊f / bin_frequency⌋
    pub bin_range: Range<usize>,
}

/// Everything `run` produces, pitch gated by the config flags
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub analysis: Analysis,
    pub pitch: Option<PitchEstimate>,
}

/// Configured analysis pipeline
#[derive(Debug, Clone)]
pub struct SpectrogramPipeline {
    config: Config,
    filter: Option<FirFilter>,
    builder: SpectrogramBuilder,
}

impl SpectrogramPipeline {
    /// Create a pipeline, designing the filter kernel and window up front
    ///
    /// # Errors
    /// `InvalidConfig` if the config breaks its invariants
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let spec = config.filter_spec();
        let filter = FirFilter::from_spec(&spec, config.sample_rate);
        if filter.is_none() && spec.filter_type.required_cutoffs() > 0 {
            log::warn!(
                "{:?} filter needs {} cutoff(s), got {}; passing signal through unfiltered",
                spec.filter_type,
                spec.filter_type.required_cutoffs(),
                spec.cutoffs.len()
            );
        }

        let builder = SpectrogramBuilder::new(config.fft_size, config.window_type)?;

        log::info!(
            "Pipeline ready: sr={} Hz, fft_size={}, window={:?}, scale={:?}, band=[{}, {}] Hz, filter={:?}",
            config.sample_rate,
            config.fft_size,
            config.window_type,
            config.scale_type,
            config.f_min,
            config.f_max,
            config.filter_type
        );

        Ok(Self {
            config,
            filter,
            builder,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Active filter, if the config produced one
    pub fn filter(&self) -> Option<&FirFilter> {
        self.filter.as_ref()
    }

    /// Band-limit `buffer`; borrowed as-is when no filter applies
    pub fn condition<'a>(&self, buffer: &'a [f64]) -> Cow<'a, [f64]> {
        match &self.filter {
            Some(filter) => Cow::Owned(filter.process(buffer)),
            None => Cow::Borrowed(buffer),
        }
    }

    /// Visible bins: [⌊f_min/bin_freq⌋, ⌊f_max/bin_freq⌋)
    ///
    /// The upper bound is not clipped to the matrix; bins past the last
    /// column read as the -100 dB fallback.
    pub fn bin_range(&self) -> Range<usize> {
        let bin_freq = self.config.bin_frequency();
        let i_min = (self.config.f_min / bin_freq).floor() as usize;
        let i_max = (self.config.f_max / bin_freq).floor() as usize;
        i_min..i_max
    }

    /// Condition, frame and transform `buffer`
    pub fn analyze(&self, buffer: &[f64]) -> Result<Analysis> {
        let conditioned = self.condition(buffer);
        let spectrogram = self.builder.build(&conditioned)?;
        Ok(self.finish(spectrogram))
    }

    /// Like [`analyze`](Self::analyze), stopping between frames once
    /// `cancel` is set
    pub fn analyze_cancellable(&self, buffer: &[f64], cancel: &AtomicBool) -> Result<Analysis> {
        let conditioned = self.condition(buffer);
        let spectrogram = self.builder.build_cancellable(&conditioned, cancel)?;
        Ok(self.finish(spectrogram))
    }

    fn finish(&self, spectrogram: Spectrogram) -> Analysis {
        let bin_range = self.bin_range();
        log::debug!(
            "Analysis done: {} frames x {} bins, visible bins {:?}",
            spectrogram.num_frames(),
            spectrogram.num_bins(),
            bin_range
        );
        Analysis {
            spectrogram,
            bin_range,
        }
    }

    /// Fundamental frequency of the raw, unfiltered buffer (0.0 if none)
    ///
    /// The default `f_min` of 0 leaves the lag window open up to
    /// `len - 1`, which makes the scan O(len²): about 1e9 multiply-adds
    /// for one second at 44.1 kHz. Set `f_min` for anything but short
    /// buffers.
    pub fn detect_pitch(&self, buffer: &[f64]) -> f64 {
        detect_fundamental(buffer, self.config.sample_rate, self.config.f_min, self.config.f_max)
    }

    /// Fundamental plus harmonics up to f_max, from the raw buffer
    pub fn extract_harmonics(&self, buffer: &[f64]) -> PitchEstimate {
        let fundamental = self.detect_pitch(buffer);
        let harmonics = harmonic_series(fundamental, self.config.f_max);
        PitchEstimate::new(fundamental, harmonics)
    }

    /// Analyze and, when enabled, estimate pitch
    ///
    /// `show_harmonics` implies a pitch estimate; `detect_pitch` alone
    /// reports the fundamental with no harmonics.
    pub fn run(&self, buffer: &[f64]) -> Result<PipelineReport> {
        let analysis = self.analyze(buffer)?;

        let pitch = if self.config.show_harmonics {
            Some(self.extract_harmonics(buffer))
        } else if self.config.detect_pitch {
            Some(PitchEstimate::new(self.detect_pitch(buffer), Vec::new()))
        } else {
            None
        };

        Ok(PipelineReport { analysis, pitch })
    }

    /// Axis tick frequencies for the configured scale and band
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        generate_ticks(count, self.config.scale_type, self.config.f_min, self.config.f_max)
    }

    /// Hand an analysis to an external renderer with the caller's color map
    pub fn render<R: Renderer>(&self, analysis: &Analysis, color_map: &dyn ColorMap, renderer: &mut R) -> R::Output {
        let request = RenderRequest {
            spectrogram: &analysis.spectrogram,
            bin_range: analysis.bin_range.clone(),
            gain_db: self.config.gain_db,
            range_db: self.config.range_db,
            color_map,
        };
        renderer.render(&request)
    }
}
