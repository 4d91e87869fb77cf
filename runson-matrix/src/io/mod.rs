//! I/O helpers: CI environment input and output-file emission.

pub mod ci_env;
pub mod outputs;
