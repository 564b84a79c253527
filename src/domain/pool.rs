//! Pool domain types
//!
//! A pool is a load-balanced set of backend members, health-checked by the
//! monitors it references.

use std::collections::BTreeMap;

use serde::Serialize;

/// Load-balanced set of backend members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Key under which the entry appeared in its application
    pub name: String,

    pub class: String,

    /// Load balancing mode, e.g. `round-robin`, `least-connections-member`
    pub load_balancing_mode: String,

    /// Backend members, in document order
    pub members: Vec<Member>,

    /// Opaque monitor references such as `{"use": "http_monitor"}`
    pub monitors: Vec<BTreeMap<String, String>>,
}

impl Pool {
    /// Total number of members
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// One backend endpoint group within a pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Address discovery mode (`static`, `fqdn`, `event`, ...)
    pub address_discovery: String,

    pub external_id: String,

    pub hostname: String,

    pub service_port: i64,
}
