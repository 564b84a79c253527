//! # Text Summaries
//!
//! Plain-text views of a decoded [`Declaration`], used by the `summary`
//! command:
//!
//! ```text
//! Declaration:
//!   Label: Sample 1
//!   ...
//!   Total tenants: 1
//!   Total apps: 1
//!   Tenant:
//!     Name: Sample_01
//!     Apps: 1
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{Declaration, Tenant};

/// Borrowing summary of a whole declaration
#[derive(Debug, Clone, Copy)]
pub struct DeclarationSummary<'a> {
    declaration: &'a Declaration,
}

/// Borrowing summary of one tenant
#[derive(Debug, Clone, Copy)]
pub struct TenantSummary<'a> {
    tenant: &'a Tenant,
}

impl Declaration {
    pub fn summary(&self) -> DeclarationSummary<'_> {
        DeclarationSummary { declaration: self }
    }
}

impl Tenant {
    pub fn summary(&self) -> TenantSummary<'_> {
        TenantSummary { tenant: self }
    }
}

impl fmt::Display for DeclarationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.declaration;
        writeln!(f, "Declaration:")?;
        writeln!(f, "  Label: {}", d.label)?;
        writeln!(f, "  Remark: {}", d.remark)?;
        writeln!(f, "  SchemaVersion: {}", d.schema_version)?;
        writeln!(f, "  Id: {}", d.id)?;
        writeln!(f, "  Controls: {}", Controls(&d.controls))?;
        writeln!(f, "  Total tenants: {}", d.tenants.len())?;
        writeln!(f, "  Total apps: {}", d.application_count())?;
        for tenant in &d.tenants {
            write!(f, "{}", tenant.summary())?;
        }
        Ok(())
    }
}

impl fmt::Display for TenantSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Tenant:")?;
        writeln!(f, "    Name: {}", self.tenant.name)?;
        writeln!(f, "    Apps: {}", self.tenant.applications.len())
    }
}

struct Controls<'a>(&'a BTreeMap<String, String>);

impl fmt::Display for Controls<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}
