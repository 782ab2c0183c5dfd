//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyInterruptedError, PyValueError};
use pyo3::prelude::*;
use crate::error::SpectroError;

mod filter_bindings;
mod spectrum_bindings;

impl From<SpectroError> for PyErr {
    fn from(err: SpectroError) -> Self {
        match err {
            SpectroError::Cancelled => PyInterruptedError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn spectro(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectrogramPipeline>()?;
    m.add_class::<filter_bindings::PyFirFilter>()?;

    // Enums
    m.add_class::<filter_bindings::PyWindowType>()?;
    m.add_class::<filter_bindings::PyFilterType>()?;
    m.add_class::<spectrum_bindings::PyScaleType>()?;

    Ok(())
}
