//! # Declaration Decoder
//!
//! Turns an already-parsed JSON document into a typed [`Declaration`] in one
//! synchronous top-down pass:
//!
//! ```text
//! projector   field-by-field extraction with defaults
//! leaf        VirtualServer / Monitor / Pool
//! container   Application / Tenant / Declaration, dispatching children by class
//! Decoder     entry point, owns the configuration
//! ```
//!
//! Decoding never fails. Anything that could not be projected or dispatched
//! is returned as [`Diagnostics`] next to the best-effort value.
//!
//! ```rust
//! use as3decl::decode::decode_declaration;
//! use serde_json::json;
//!
//! let document = json!({
//!     "class": "ADC",
//!     "label": "example",
//!     "Sample": {"class": "Tenant", "app": {"class": "Application"}}
//! });
//! let decoded = decode_declaration(&document);
//! assert_eq!(decoded.value.tenants[0].applications[0].name, "app");
//! ```

pub mod container;
pub mod context;
pub mod diagnostics;
pub mod dispatch;
pub mod leaf;
pub mod projector;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DecodeConfig;
use crate::domain::{Application, Declaration, Monitor, Pool, Tenant, VirtualServer};

pub use container::{decode_application, decode_declaration_object, decode_tenant};
pub use context::DecodeContext;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use dispatch::{ApplicationChild, ChildClass, DeclarationChild, TenantChild, CLASS_KEY};
pub use leaf::{decode_monitor, decode_pool, decode_virtual_server};
pub use projector::{
    project, FieldKind, FieldSpec, Project, Projection, Projector, UnprojectedField,
    UnprojectedReason, ValueKind,
};

/// Class of the AS3 request envelope wrapping a declaration
pub const ENVELOPE_CLASS: &str = "AS3";

/// Key holding the declaration inside an AS3 envelope
pub const ENVELOPE_DECLARATION_KEY: &str = "declaration";

/// A decoded value together with everything the decoder had to leave out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Decoded<T> {
    /// True when no field was mistyped and no entry was skipped
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.has_mismatches()
    }
}

/// Named entities whose malformed input still keeps its key
trait Named: Default {
    fn named(name: &str) -> Self;
}

macro_rules! impl_named {
    ($($ty:ty),*) => {
        $(impl Named for $ty {
            fn named(name: &str) -> Self {
                Self { name: name.to_string(), ..Default::default() }
            }
        })*
    };
}

impl_named!(Tenant, Application, VirtualServer, Monitor, Pool);

/// Declaration decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode a declaration document.
    ///
    /// A non-object document yields an empty declaration and a
    /// `MalformedContainer` diagnostic at the root.
    pub fn decode_declaration(&self, document: &Value) -> Decoded<Declaration> {
        let span = crate::decode_span!("declaration", key_order = %self.config.key_order);
        let _enter = span.enter();

        let mut ctx = DecodeContext::new(&self.config);
        let value = match document.as_object() {
            Some(object) => decode_declaration_object(object, &mut ctx),
            None => {
                ctx.report(Diagnostic::malformed("", ValueKind::of(document)));
                Declaration::default()
            }
        };
        finish(value, ctx)
    }

    /// Decode a declaration, unwrapping an AS3 request envelope
    /// (`{"class": "AS3", "declaration": {...}}`) when present.
    pub fn decode_document(&self, document: &Value) -> Decoded<Declaration> {
        let Some(envelope) = document.as_object().filter(|o| is_envelope(o)) else {
            return self.decode_declaration(document);
        };

        let span = crate::decode_span!("document", key_order = %self.config.key_order);
        let _enter = span.enter();

        let mut ctx = DecodeContext::new(&self.config);
        let value = ctx.within(ENVELOPE_DECLARATION_KEY, |ctx| {
            match envelope.get(ENVELOPE_DECLARATION_KEY) {
                Some(Value::Object(object)) => decode_declaration_object(object, ctx),
                other => {
                    let found = other.map_or(ValueKind::Null, ValueKind::of);
                    ctx.report(Diagnostic::malformed(ctx.path().to_string(), found));
                    Declaration::default()
                }
            }
        });
        finish(value, ctx)
    }

    /// Decode a single tenant entry as if found under `key`
    pub fn decode_tenant(&self, key: &str, value: &Value) -> Decoded<Tenant> {
        self.decode_entry(key, value, decode_tenant)
    }

    /// Decode a single application entry as if found under `key`
    pub fn decode_application(&self, key: &str, value: &Value) -> Decoded<Application> {
        self.decode_entry(key, value, decode_application)
    }

    /// Decode a single virtual server entry as if found under `key`
    pub fn decode_virtual_server(&self, key: &str, value: &Value) -> Decoded<VirtualServer> {
        self.decode_entry(key, value, decode_virtual_server)
    }

    /// Decode a single monitor entry as if found under `key`
    pub fn decode_monitor(&self, key: &str, value: &Value) -> Decoded<Monitor> {
        self.decode_entry(key, value, decode_monitor)
    }

    /// Decode a single pool entry as if found under `key`
    pub fn decode_pool(&self, key: &str, value: &Value) -> Decoded<Pool> {
        self.decode_entry(key, value, decode_pool)
    }

    fn decode_entry<T: Named>(
        &self,
        key: &str,
        value: &Value,
        decode: impl FnOnce(&str, &Map<String, Value>, &mut DecodeContext<'_>) -> T,
    ) -> Decoded<T> {
        let mut ctx = DecodeContext::new(&self.config);
        let value = match value.as_object() {
            Some(object) => decode(key, object, &mut ctx),
            None => {
                let path = diagnostics::pointer_join("", key);
                ctx.report(Diagnostic::malformed(path, ValueKind::of(value)));
                T::named(key)
            }
        };
        Decoded { value, diagnostics: ctx.into_diagnostics() }
    }
}

fn is_envelope(object: &Map<String, Value>) -> bool {
    object.get(CLASS_KEY).and_then(Value::as_str) == Some(ENVELOPE_CLASS)
}

fn finish(declaration: Declaration, ctx: DecodeContext<'_>) -> Decoded<Declaration> {
    debug!(
        tenants = declaration.tenants.len(),
        applications = declaration.application_count(),
        diagnostics = ctx.diagnostic_count(),
        "Decoded declaration"
    );
    Decoded { value: declaration, diagnostics: ctx.into_diagnostics() }
}

/// Decode a declaration document with the default configuration
pub fn decode_declaration(document: &Value) -> Decoded<Declaration> {
    Decoder::default().decode_declaration(document)
}

/// Decode a declaration or AS3 envelope with the default configuration
pub fn decode_document(document: &Value) -> Decoded<Declaration> {
    Decoder::default().decode_document(document)
}
