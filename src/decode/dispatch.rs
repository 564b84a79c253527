//! Discriminant routing tables
//!
//! Each container level recognizes a fixed set of `class` strings. The
//! tables below are the only place those strings are mapped to decoders;
//! everything else is skipped and reported.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::KeyOrder;
use crate::domain::ServiceClass;

use super::context::DecodeContext;
use super::diagnostics::{pointer_join, Diagnostic};

/// Name of the discriminant field inside child objects
pub const CLASS_KEY: &str = "class";

/// Child classes recognized at one container level
pub trait ChildClass: Sized + Copy {
    /// Level name used in logs
    const LEVEL: &'static str;

    /// Recognized class strings, case-sensitive
    const CLASSES: &'static [&'static str];

    fn from_class(class: &str) -> Option<Self>;
}

/// Children of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationChild {
    Tenant,
}

impl ChildClass for DeclarationChild {
    const LEVEL: &'static str = "declaration";
    const CLASSES: &'static [&'static str] = &["Tenant"];

    fn from_class(class: &str) -> Option<Self> {
        match class {
            "Tenant" => Some(DeclarationChild::Tenant),
            _ => None,
        }
    }
}

/// Children of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantChild {
    Application,
}

impl ChildClass for TenantChild {
    const LEVEL: &'static str = "tenant";
    const CLASSES: &'static [&'static str] = &["Application"];

    fn from_class(class: &str) -> Option<Self> {
        match class {
            "Application" => Some(TenantChild::Application),
            _ => None,
        }
    }
}

/// Children of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationChild {
    VirtualServer(ServiceClass),
    Monitor,
    Pool,
}

impl ChildClass for ApplicationChild {
    const LEVEL: &'static str = "application";
    const CLASSES: &'static [&'static str] = &[
        "Service_HTTPS",
        "Service_HTTP",
        "Service_TCP",
        "Service_UDP",
        "Service_L4",
        "Monitor",
        "Pool",
    ];

    fn from_class(class: &str) -> Option<Self> {
        if let Some(service) = ServiceClass::from_class(class) {
            return Some(ApplicationChild::VirtualServer(service));
        }
        match class {
            "Monitor" => Some(ApplicationChild::Monitor),
            "Pool" => Some(ApplicationChild::Pool),
            _ => None,
        }
    }
}

/// A child entry that matched its level's routing table
#[derive(Debug, Clone, Copy)]
pub struct ChildEntry<'a, C> {
    pub key: &'a str,
    pub class: C,
    pub value: &'a Map<String, Value>,
}

/// Select the child entries of `container` that route to a decoder.
///
/// Every object-valued key is a candidate, own fields included. Non-object
/// values are skipped silently; objects with a missing or unknown class are
/// skipped and reported, unless `is_own_field` holds for their key.
pub fn select_children<'a, C: ChildClass>(
    container: &'a Map<String, Value>,
    is_own_field: impl Fn(&str) -> bool,
    ctx: &mut DecodeContext<'_>,
) -> Vec<ChildEntry<'a, C>> {
    let mut entries: Vec<(&'a String, &'a Value)> = container.iter().collect();
    if ctx.config().key_order == KeyOrder::Sorted {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    let mut children = Vec::new();
    for (key, value) in entries {
        let Some(object) = value.as_object() else {
            continue;
        };

        let class = object.get(CLASS_KEY);
        match class.and_then(Value::as_str).and_then(C::from_class) {
            Some(class) => children.push(ChildEntry { key: key.as_str(), class, value: object }),
            None if is_own_field(key.as_str()) => {}
            None => {
                let class = class.map(|c| match c {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
                let path = pointer_join(ctx.path(), key);
                debug!(
                    level = C::LEVEL,
                    path = %path,
                    class = ?class,
                    "Skipping unrecognized entry"
                );
                ctx.report(Diagnostic::unrecognized(path, class));
            }
        }
    }
    children
}
