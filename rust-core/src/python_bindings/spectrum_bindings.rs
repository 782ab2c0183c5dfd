//! Python bindings for the analysis pipeline

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use crate::pipeline::{Config, ConfigOverrides, SpectrogramPipeline};
use crate::spectrum::ScaleType;
use super::filter_bindings::{PyFilterType, PyWindowType};

/// Frequency scale enum exposed to Python
#[pyclass(name = "ScaleType")]
#[derive(Clone)]
pub enum PyScaleType {
    Linear,
    Mel,
}

impl From<PyScaleType> for ScaleType {
    fn from(py_scale: PyScaleType) -> Self {
        match py_scale {
            PyScaleType::Linear => ScaleType::Linear,
            PyScaleType::Mel => ScaleType::Mel,
        }
    }
}

/// Analysis pipeline exposed to Python
#[pyclass(name = "SpectrogramPipeline")]
pub struct PySpectrogramPipeline {
    pipeline: SpectrogramPipeline,
}

fn as_slice<'a>(signal: &'a PyReadonlyArray1<f64>) -> PyResult<&'a [f64]> {
    signal.as_slice().map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymethods]
impl PySpectrogramPipeline {
    /// Create a pipeline; omitted arguments keep their defaults
    #[new]
    #[pyo3(signature = (
        sample_rate=None, scale_type=None, f_min=None, f_max=None, fft_size=None,
        window_type=None, gain_db=None, range_db=None, filter_type=None,
        filter_cutoffs=None, detect_pitch=None, show_harmonics=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        sample_rate: Option<f64>,
        scale_type: Option<PyScaleType>,
        f_min: Option<f64>,
        f_max: Option<f64>,
        fft_size: Option<usize>,
        window_type: Option<PyWindowType>,
        gain_db: Option<f64>,
        range_db: Option<f64>,
        filter_type: Option<PyFilterType>,
        filter_cutoffs: Option<Vec<f64>>,
        detect_pitch: Option<bool>,
        show_harmonics: Option<bool>,
    ) -> PyResult<Self> {
        let config = Config::with_overrides(ConfigOverrides {
            sample_rate,
            scale_type: scale_type.map(Into::into),
            f_min,
            f_max,
            fft_size,
            window_type: window_type.map(Into::into),
            gain_db,
            range_db,
            filter_type: filter_type.map(Into::into),
            filter_cutoffs,
            detect_pitch,
            show_harmonics,
        })?;

        Ok(Self {
            pipeline: SpectrogramPipeline::new(config)?,
        })
    }

    /// Build the spectrogram
    ///
    /// Returns:
    ///     (matrix[frames, bins] in dB, (i_min, i_max))
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<(&'py PyArray2<f64>, (usize, usize))> {
        let samples = as_slice(&signal)?;
        let analysis = py.allow_threads(|| self.pipeline.analyze(samples))?;

        let range = (analysis.bin_range.start, analysis.bin_range.end);
        Ok((PyArray2::from_owned_array(py, analysis.spectrogram.into_array()), range))
    }

    /// Fundamental frequency in Hz of the unfiltered signal (0.0 if none)
    fn detect_pitch(&self, py: Python<'_>, signal: PyReadonlyArray1<f64>) -> PyResult<f64> {
        let samples = as_slice(&signal)?;
        Ok(py.allow_threads(|| self.pipeline.detect_pitch(samples)))
    }

    /// Fundamental and harmonic frequencies in Hz
    ///
    /// Returns:
    ///     (fundamental, harmonics array)
    fn extract_harmonics<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<(f64, &'py PyArray1<f64>)> {
        let samples = as_slice(&signal)?;
        let estimate = py.allow_threads(|| self.pipeline.extract_harmonics(samples));

        Ok((estimate.fundamental, PyArray1::from_vec(py, estimate.harmonics)))
    }

    /// Tick frequencies for the configured axis
    fn ticks<'py>(&self, py: Python<'py>, count: usize) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.pipeline.ticks(count))
    }

    /// Get current sample rate
    fn get_sample_rate(&self) -> f64 {
        self.pipeline.config().sample_rate
    }

    /// Get current FFT size
    fn get_fft_size(&self) -> usize {
        self.pipeline.config().fft_size
    }
}
