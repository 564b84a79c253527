//! # Error Handling
//!
//! Fatal error types for as3decl, defined with `thiserror`. Decoding itself is
//! best-effort and reports through diagnostics; these errors only cover
//! configuration and document acquisition.

pub mod types;

pub use types::{Error, Result};
