//! Drone frame renderer Python bindings
//!
//! Frames are rendered off-screen and handed back as `H x W x 4` RGBA numpy
//! arrays, so a Python simulation can record or display them however it likes.

use pyo3::prelude::*;

mod display;

pub use display::*;

/// Python module for the drone frame renderer
#[pymodule]
fn dronevis_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<display::PyDisplay>()?;
    Ok(())
}
