//! Per-decode state: configuration, current location and diagnostics

use crate::config::DecodeConfig;

use super::diagnostics::{pointer_join, Diagnostic, Diagnostics};
use super::projector::{Projection, UnprojectedField};

/// Mutable state threaded through one decode pass
#[derive(Debug)]
pub struct DecodeContext<'c> {
    config: &'c DecodeConfig,
    path: String,
    diagnostics: Diagnostics,
}

impl<'c> DecodeContext<'c> {
    pub fn new(config: &'c DecodeConfig) -> Self {
        Self { config, path: String::new(), diagnostics: Diagnostics::new() }
    }

    pub fn config(&self) -> &DecodeConfig {
        self.config
    }

    /// JSON pointer of the entry being decoded
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `f` with `key` appended to the current path
    pub fn within<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let len = self.path.len();
        self.path = pointer_join(&self.path, key);
        let result = f(self);
        self.path.truncate(len);
        result
    }

    /// Record a diagnostic at an explicit path
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Take the projected value, recording its unprojected fields at the
    /// current path. Absent fields are dropped unless `report_missing` is set.
    pub fn accept<T>(&mut self, projection: Projection<T>) -> T {
        let report_missing = self.config.report_missing;
        for field in projection.unprojected {
            if report_missing || !field.is_missing() {
                self.report_field(field);
            }
        }
        projection.value
    }

    fn report_field(&mut self, field: UnprojectedField) {
        let diagnostic = Diagnostic::unprojected(self.path.clone(), field);
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}
