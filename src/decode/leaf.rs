//! Leaf decoders: virtual servers, monitors and pools
//!
//! Leaves are projected and named; nothing below them is dispatched on class.

use serde_json::{Map, Value};

use crate::domain::{Member, Monitor, Pool, ProfileRef, VirtualServer};

use super::context::DecodeContext;
use super::projector::{as_string_map, project, FieldKind, FieldSpec, Project, Projector};

impl Project for VirtualServer {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("class", FieldKind::String),
        FieldSpec::new("layer4", FieldKind::String),
        FieldSpec::new("pool", FieldKind::PoolRef),
        FieldSpec::new("allowVlans", FieldKind::StringMapList),
        FieldSpec::new("clientTLS", FieldKind::StringMap),
        FieldSpec::new("serverTLS", FieldKind::StringMap),
        FieldSpec::new("profileTCP", FieldKind::ProfileRef),
        FieldSpec::new("profileHTTP", FieldKind::ProfileRef),
        FieldSpec::new("redirect80", FieldKind::Boolean),
        FieldSpec::new("virtualAddresses", FieldKind::StringList),
        FieldSpec::new("virtualPort", FieldKind::Integer),
        FieldSpec::new("persistenceMethods", FieldKind::StringList),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            name: String::new(),
            class: p.string("class"),
            layer4: p.string("layer4"),
            pool: p.optional("pool", FieldKind::PoolRef, pool_name),
            allow_vlans: p.string_map_list("allowVlans"),
            client_tls: p.string_map("clientTLS"),
            server_tls: p.string_map("serverTLS"),
            profile_tcp: p.optional("profileTCP", FieldKind::ProfileRef, profile_ref),
            profile_http: p.optional("profileHTTP", FieldKind::ProfileRef, profile_ref),
            redirect_80: p.boolean("redirect80"),
            virtual_addresses: p.string_list("virtualAddresses"),
            virtual_port: p.integer("virtualPort"),
            persistence_methods: p.string_list("persistenceMethods"),
        }
    }
}

impl Project for Monitor {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("class", FieldKind::String),
        FieldSpec::new("ciphers", FieldKind::String),
        FieldSpec::new("interval", FieldKind::Integer),
        FieldSpec::new("monitorType", FieldKind::String),
        FieldSpec::new("receive", FieldKind::String),
        FieldSpec::new("receiveDown", FieldKind::String),
        FieldSpec::new("send", FieldKind::String),
        FieldSpec::new("timeout", FieldKind::String),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            name: String::new(),
            class: p.string("class"),
            ciphers: p.string("ciphers"),
            interval: p.integer("interval"),
            monitor_type: p.string("monitorType"),
            receive: p.string("receive"),
            receive_down: p.string("receiveDown"),
            send: p.string("send"),
            timeout: p.string("timeout"),
        }
    }
}

impl Project for Pool {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("class", FieldKind::String),
        FieldSpec::new("loadBalancingMode", FieldKind::String),
        FieldSpec::new("members", FieldKind::RecordList),
        FieldSpec::new("monitors", FieldKind::StringMapList),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            name: String::new(),
            class: p.string("class"),
            load_balancing_mode: p.string("loadBalancingMode"),
            members: p.records("members"),
            monitors: p.string_map_list("monitors"),
        }
    }
}

impl Project for Member {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("addressDiscovery", FieldKind::String),
        FieldSpec::new("externalId", FieldKind::String),
        FieldSpec::new("hostname", FieldKind::String),
        FieldSpec::new("servicePort", FieldKind::Integer),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            address_discovery: p.string("addressDiscovery"),
            external_id: p.string("externalId"),
            hostname: p.string("hostname"),
            service_port: p.integer("servicePort"),
        }
    }
}

/// `"web_pool"` or `{"use": "web_pool"}`
fn pool_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Object(pointer) => pointer.get("use").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// `"normal"` or an opaque string map such as `{"bigip": "/Common/http"}`
fn profile_ref(value: &Value) -> Option<ProfileRef> {
    match value {
        Value::String(name) => Some(ProfileRef::Name(name.clone())),
        Value::Object(_) => as_string_map(value).map(ProfileRef::Reference),
        _ => None,
    }
}

/// Decode a virtual server entry found under `key`
pub fn decode_virtual_server(
    key: &str,
    value: &Map<String, Value>,
    ctx: &mut DecodeContext<'_>,
) -> VirtualServer {
    ctx.within(key, |ctx| VirtualServer { name: key.to_string(), ..ctx.accept(project(value)) })
}

/// Decode a monitor entry found under `key`
pub fn decode_monitor(
    key: &str,
    value: &Map<String, Value>,
    ctx: &mut DecodeContext<'_>,
) -> Monitor {
    ctx.within(key, |ctx| Monitor { name: key.to_string(), ..ctx.accept(project(value)) })
}

/// Decode a pool entry found under `key`
pub fn decode_pool(key: &str, value: &Map<String, Value>, ctx: &mut DecodeContext<'_>) -> Pool {
    ctx.within(key, |ctx| Pool { name: key.to_string(), ..ctx.accept(project(value)) })
}
