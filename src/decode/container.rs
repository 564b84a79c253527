//! Container decoders: applications, tenants and the declaration root
//!
//! A container projects its own scalar fields, then routes each child entry
//! by class to the next-lower decoder. Every typed collection keeps the
//! visitation order of its own kind.

use serde_json::{Map, Value};

use crate::domain::{Application, Declaration, Tenant};

use super::context::DecodeContext;
use super::dispatch::{
    select_children, ApplicationChild, ChildClass, DeclarationChild, TenantChild,
};
use super::leaf::{decode_monitor, decode_pool, decode_virtual_server};
use super::projector::{project, FieldKind, FieldSpec, Project, Projector};

impl Project for Declaration {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("label", FieldKind::String),
        FieldSpec::new("remark", FieldKind::String),
        FieldSpec::new("schemaVersion", FieldKind::String),
        FieldSpec::new("id", FieldKind::String),
        FieldSpec::new("updateMode", FieldKind::String),
        FieldSpec::new("controls", FieldKind::StringMap),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            label: p.string("label"),
            remark: p.string("remark"),
            schema_version: p.string("schemaVersion"),
            id: p.string("id"),
            update_mode: p.string("updateMode"),
            controls: p.string_map("controls"),
            tenants: Vec::new(),
        }
    }
}

impl Project for Tenant {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("defaultRouteDomain", FieldKind::Integer),
        FieldSpec::new("enable", FieldKind::Boolean),
        FieldSpec::new("optimisticLockKey", FieldKind::String),
    ];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            name: String::new(),
            default_route_domain: p.integer("defaultRouteDomain"),
            enable: p.boolean("enable"),
            optimistic_lock_key: p.string("optimisticLockKey"),
            applications: Vec::new(),
        }
    }
}

impl Project for Application {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("template", FieldKind::String)];

    fn project(p: &mut Projector<'_>) -> Self {
        Self {
            name: String::new(),
            template: p.string("template"),
            virtual_servers: Vec::new(),
            monitors: Vec::new(),
            pools: Vec::new(),
        }
    }
}

/// Decode an application entry found under `key`
pub fn decode_application(
    key: &str,
    value: &Map<String, Value>,
    ctx: &mut DecodeContext<'_>,
) -> Application {
    ctx.within(key, |ctx| {
        let mut app = Application { name: key.to_string(), ..ctx.accept(project(value)) };

        for child in select_children::<ApplicationChild>(value, Application::declares, ctx) {
            match child.class {
                ApplicationChild::VirtualServer(_) => {
                    app.virtual_servers.push(decode_virtual_server(child.key, child.value, ctx))
                }
                ApplicationChild::Monitor => {
                    app.monitors.push(decode_monitor(child.key, child.value, ctx))
                }
                ApplicationChild::Pool => app.pools.push(decode_pool(child.key, child.value, ctx)),
            }
        }
        app
    })
}

/// Decode a tenant entry found under `key`
pub fn decode_tenant(
    key: &str,
    value: &Map<String, Value>,
    ctx: &mut DecodeContext<'_>,
) -> Tenant {
    ctx.within(key, |ctx| {
        let mut tenant = Tenant { name: key.to_string(), ..ctx.accept(project(value)) };

        for child in select_children::<TenantChild>(value, Tenant::declares, ctx) {
            match child.class {
                TenantChild::Application => {
                    tenant.applications.push(decode_application(child.key, child.value, ctx))
                }
            }
        }
        tenant
    })
}

/// Decode the declaration root. The root has no key and no name.
pub fn decode_declaration_object(
    value: &Map<String, Value>,
    ctx: &mut DecodeContext<'_>,
) -> Declaration {
    let mut declaration: Declaration = ctx.accept(project(value));

    for child in select_children::<DeclarationChild>(value, Declaration::declares, ctx) {
        match child.class {
            DeclarationChild::Tenant => {
                declaration.tenants.push(decode_tenant(child.key, child.value, ctx))
            }
        }
    }

    tracing::trace!(
        level = DeclarationChild::LEVEL,
        tenants = declaration.tenants.len(),
        "Declaration children decoded"
    );
    declaration
}
