//! Configuration constants, pass configuration and error types

/// Named constants and per-pass configuration
pub mod configuration;
/// Error taxonomy for catalog, validation and pass failures
pub mod error;
