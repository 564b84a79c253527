//! # Observability Infrastructure
//!
//! Structured logging for the decoder and the CLI.

pub mod logging;

pub use logging::init_logging;
