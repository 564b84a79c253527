//! Non-fatal decode diagnostics
//!
//! Every omission the decoder makes is recorded here instead of being
//! silently dropped, so callers can tell a full decode from a best-effort one.

use std::fmt;

use serde::Serialize;

use super::projector::{UnprojectedField, UnprojectedReason, ValueKind};

/// What went wrong at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A declared field was absent or had an incompatible kind
    UnprojectedField { field: String, reason: UnprojectedReason },

    /// A child object whose class is absent or not known at its level.
    /// `class` is `None` when the object carries no class at all.
    UnrecognizedEntry { class: Option<String> },

    /// A value that had to be an object was not one
    MalformedContainer { found: ValueKind },
}

/// A located diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// JSON pointer to the container or entry the diagnostic is about
    pub path: String,

    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn unprojected(path: impl Into<String>, field: UnprojectedField) -> Self {
        Self {
            path: path.into(),
            kind: DiagnosticKind::UnprojectedField { field: field.field, reason: field.reason },
        }
    }

    pub fn unrecognized(path: impl Into<String>, class: Option<String>) -> Self {
        Self { path: path.into(), kind: DiagnosticKind::UnrecognizedEntry { class } }
    }

    pub fn malformed(path: impl Into<String>, found: ValueKind) -> Self {
        Self { path: path.into(), kind: DiagnosticKind::MalformedContainer { found } }
    }

    /// Human-readable description without the path
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnprojectedField { field, reason } => {
                UnprojectedField { field: field.clone(), reason: *reason }.to_string()
            }
            DiagnosticKind::UnrecognizedEntry { class: Some(class) } => {
                format!("entry skipped: unrecognized class {}", class)
            }
            DiagnosticKind::UnrecognizedEntry { class: None } => {
                "entry skipped: no class".to_string()
            }
            DiagnosticKind::MalformedContainer { found } => {
                format!("expected object, found {}", found)
            }
        }
    }

    /// A field that was merely absent
    pub fn is_missing_field(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::UnprojectedField { reason: UnprojectedReason::Missing, .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { self.path.as_str() };
        write!(f, "{}: {}", path, self.message())
    }
}

/// Ordered collection of diagnostics from one decode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn unprojected(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| matches!(d.kind, DiagnosticKind::UnprojectedField { .. }))
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| matches!(d.kind, DiagnosticKind::UnrecognizedEntry { .. }))
    }

    pub fn malformed(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| matches!(d.kind, DiagnosticKind::MalformedContainer { .. }))
    }

    /// Anything beyond absent fields: type mismatches, skipped entries,
    /// malformed containers
    pub fn has_mismatches(&self) -> bool {
        self.iter().any(|d| !d.is_missing_field())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Append `segment` to a JSON pointer, escaping `~` and `/`
pub fn pointer_join(base: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", base, escaped)
}
