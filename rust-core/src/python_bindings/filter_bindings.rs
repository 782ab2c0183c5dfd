//! Python bindings for windows and FIR filters

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::{FilterSpec, FilterType, FirFilter, WindowType};

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Rectangular,
    Cosine,
    Hanning,
    BH7,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Rectangular => WindowType::None,
            PyWindowType::Cosine => WindowType::Cosine,
            PyWindowType::Hanning => WindowType::Hanning,
            PyWindowType::BH7 => WindowType::BlackmanHarris7,
        }
    }
}

/// Filter type enum exposed to Python
#[pyclass(name = "FilterType")]
#[derive(Clone)]
pub enum PyFilterType {
    Passthrough,
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

impl From<PyFilterType> for FilterType {
    fn from(py_filter: PyFilterType) -> Self {
        match py_filter {
            PyFilterType::Passthrough => FilterType::None,
            PyFilterType::Lowpass => FilterType::Lowpass,
            PyFilterType::Highpass => FilterType::Highpass,
            PyFilterType::Bandpass => FilterType::Bandpass,
            PyFilterType::Notch => FilterType::Notch,
        }
    }
}

/// FIR filter exposed to Python
#[pyclass(name = "FirFilter")]
pub struct PyFirFilter {
    filter: FirFilter,
}

#[pymethods]
impl PyFirFilter {
    /// Create a filter from explicit coefficients
    #[new]
    fn new(coefficients: PyReadonlyArray1<f64>) -> PyResult<Self> {
        let coeffs = coefficients
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .to_vec();
        Ok(Self {
            filter: FirFilter::new(coeffs),
        })
    }

    /// Design a 101-tap windowed-sinc filter
    ///
    /// Args:
    ///     filter_type: Filter type
    ///     cutoffs: Cutoffs in Hz (1 for lowpass/highpass, 2 for bandpass/notch)
    ///     sample_rate: Sample rate in Hz
    ///
    /// Returns:
    ///     New filter, or None when the cutoffs are insufficient
    #[staticmethod]
    fn design(filter_type: PyFilterType, cutoffs: Vec<f64>, sample_rate: f64) -> Option<Self> {
        let spec = FilterSpec::new(filter_type.into(), cutoffs);
        FirFilter::from_spec(&spec, sample_rate).map(|filter| Self { filter })
    }

    /// Convolve a whole buffer (same length output)
    fn process<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let input = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let output = self.filter.process(input);

        Ok(PyArray1::from_vec(py, output))
    }

    /// Get filter coefficients
    fn get_coefficients<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.filter.coefficients())
    }

    /// Get filter length
    fn length(&self) -> usize {
        self.filter.length()
    }
}
