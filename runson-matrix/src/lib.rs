//! CI build matrix generator.
//!
//! Turns a run id, a runner label and a few flags into the GitHub Actions
//! step outputs that drive a build matrix: which os/arch combinations to
//! build and which runner each one uses.
//!
//! - **[`core`]**: Pure matrix construction. No I/O.
//! - **[`io`]**: CI environment capture and output-file emission.
//!
//! [`generate`] ties the two together for the binary.

pub mod core;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
