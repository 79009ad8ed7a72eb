//! Tracing/logging initialization for Eduforge binaries.

pub mod tracing_init;

pub use tracing_init::init;
