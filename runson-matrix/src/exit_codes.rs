//! Stable exit codes for the generator CLI.

/// Outputs were written.
pub const OK: i32 = 0;
/// Unknown runner label or an output file that could not be written.
pub const INVALID: i32 = 1;
