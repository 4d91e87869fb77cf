//! Deterministic, pure logic for matrix construction.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod error;
pub mod matrix;
pub mod runner;
