//! Core compute primitives.
//!
//! Feature data flows through the pipeline as a row-major [`Matrix`].

mod matrix;

pub use matrix::Matrix;
