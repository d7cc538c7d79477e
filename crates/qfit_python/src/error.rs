//! Error conversion for the Python boundary
//!
//! Gantree: L9_Python → to_py_err

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;
use qfit_core::QfitError;

/// Bad input raises `ValueError`, anything else `RuntimeError`
pub(crate) fn to_py_err(err: QfitError) -> PyErr {
    if err.is_configuration_error() || err.is_shape_error() || err.is_validation_error() {
        PyValueError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

/// JSON parse failures are always the caller's input
pub(crate) fn json_err(err: serde_json::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}
