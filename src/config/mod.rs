//! # Configuration Management
//!
//! Decoder options and logging settings. Both can be built in code or read
//! from `AS3DECL_*` environment variables.

pub mod settings;

pub use settings::{DecodeConfig, KeyOrder, ObservabilityConfig};
