//! # as3decl
//!
//! Decoder for AS3 declarations: loosely-structured JSON documents in which
//! every nested object carries a `class` discriminant. A declaration is turned
//! into a strongly-typed, four-level tree in one pass:
//!
//! ```text
//! Declaration → Tenant → Application → { VirtualServer, Monitor, Pool }
//! ```
//!
//! ## Core Components
//!
//! - **Projector**: field-by-field extraction with defaults, no reflection
//! - **Dispatch**: per-level `class` routing tables
//! - **Diagnostics**: everything the decoder skipped or could not project
//! - **CLI**: the `as3decl` binary built on top of the library
//!
//! ## Example Usage
//!
//! ```rust
//! use as3decl::{decode_declaration, ServiceClass};
//! use serde_json::json;
//!
//! let document = json!({
//!     "class": "ADC",
//!     "schemaVersion": "3.12.0",
//!     "Sample_01": {
//!         "class": "Tenant",
//!         "A1": {
//!             "class": "Application",
//!             "web_vs": {"class": "Service_HTTP", "virtualPort": 80},
//!             "cert": {"class": "Certificate"}
//!         }
//!     }
//! });
//!
//! let decoded = decode_declaration(&document);
//! let vs = &decoded.value.tenants[0].applications[0].virtual_servers[0];
//! assert_eq!(vs.name, "web_vs");
//! assert_eq!(vs.service_class(), Some(ServiceClass::Http));
//! assert_eq!(decoded.diagnostics.unrecognized().count(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod decode;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod summary;

// Re-export commonly used types and traits
pub use config::{DecodeConfig, KeyOrder, ObservabilityConfig};
pub use decode::{decode_declaration, decode_document, Decoded, Decoder, Diagnostic, Diagnostics};
pub use domain::{
    Application, Declaration, Member, Monitor, Pool, ProfileRef, ServiceClass, Tenant,
    VirtualServer,
};
pub use errors::{Error, Result};
pub use observability::init_logging;
pub use summary::{DeclarationSummary, TenantSummary};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
