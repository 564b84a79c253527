//! Declaration, tenant and application domain types
//!
//! These are the container levels of a decoded declaration. Each container
//! keeps its children as typed lists instead of the named-object maps used on
//! the wire; the map key survives as the child's `name`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Monitor, Pool, VirtualServer};

/// Root of a decoded declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub label: String,

    pub remark: String,

    /// AS3 schema version the declaration targets, e.g. `3.12.0`
    pub schema_version: String,

    pub id: String,

    /// `selective` or `complete`
    pub update_mode: String,

    /// Free-form control metadata
    pub controls: BTreeMap<String, String>,

    pub tenants: Vec<Tenant>,
}

impl Declaration {
    /// Total applications across all tenants
    pub fn application_count(&self) -> usize {
        self.tenants.iter().map(|t| t.applications.len()).sum()
    }

    /// Look up a tenant by name
    pub fn tenant(&self, name: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.name == name)
    }

    /// Names of every virtual server, tenant by tenant and application by
    /// application, in collection order
    pub fn virtual_server_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tenants
            .iter()
            .flat_map(|t| t.applications.iter())
            .flat_map(|a| a.virtual_servers.iter())
            .map(|vs| vs.name.as_str())
    }
}

/// Administrative grouping of applications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Key under which the tenant appeared in the declaration
    pub name: String,

    pub default_route_domain: i64,

    pub enable: bool,

    /// Opaque concurrency token owned by the target system
    pub optimistic_lock_key: String,

    pub applications: Vec<Application>,
}

impl Tenant {
    /// Look up an application by name
    pub fn application(&self, name: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.name == name)
    }
}

/// Grouping of virtual servers, pools and monitors for one service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Key under which the application appeared in its tenant
    pub name: String,

    pub template: String,

    pub virtual_servers: Vec<VirtualServer>,

    pub monitors: Vec<Monitor>,

    pub pools: Vec<Pool>,
}

impl Application {
    pub fn virtual_server_count(&self) -> usize {
        self.virtual_servers.len()
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Look up a pool by name, e.g. to resolve [`VirtualServer::pool`]
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }
}
