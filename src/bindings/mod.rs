//! FFI facade for Python.
pub mod python;
