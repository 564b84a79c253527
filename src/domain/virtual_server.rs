//! Virtual server domain types
//!
//! A virtual server is a listening endpoint. AS3 spells it as one of several
//! service classes; all of them normalize into the single [`VirtualServer`]
//! shape, which keeps the original class string.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Service classes that decode into a [`VirtualServer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceClass {
    /// `Service_HTTPS`
    Https,

    /// `Service_HTTP`
    Http,

    /// `Service_TCP`
    Tcp,

    /// `Service_UDP`
    Udp,

    /// `Service_L4`
    L4,
}

impl ServiceClass {
    /// Every service class, in routing-table order
    pub const ALL: [ServiceClass; 5] = [
        ServiceClass::Https,
        ServiceClass::Http,
        ServiceClass::Tcp,
        ServiceClass::Udp,
        ServiceClass::L4,
    ];

    /// Wire class string
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Https => "Service_HTTPS",
            ServiceClass::Http => "Service_HTTP",
            ServiceClass::Tcp => "Service_TCP",
            ServiceClass::Udp => "Service_UDP",
            ServiceClass::L4 => "Service_L4",
        }
    }

    /// Look up a class string (case-sensitive)
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "Service_HTTPS" => Some(ServiceClass::Https),
            "Service_HTTP" => Some(ServiceClass::Http),
            "Service_TCP" => Some(ServiceClass::Tcp),
            "Service_UDP" => Some(ServiceClass::Udp),
            "Service_L4" => Some(ServiceClass::L4),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a TCP or HTTP profile.
///
/// AS3 accepts either a bare profile name or a pointer object such as
/// `{"bigip": "/Common/http"}` or `{"use": "custom_http"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProfileRef {
    Name(String),
    Reference(BTreeMap<String, String>),
}

impl fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileRef::Name(name) => write!(f, "{}", name),
            ProfileRef::Reference(reference) => {
                let parts: Vec<String> =
                    reference.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// Normalized virtual server covering every [`ServiceClass`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServer {
    /// Key under which the entry appeared in its application
    pub name: String,

    /// Original class string, e.g. `Service_HTTPS`
    pub class: String,

    /// Layer-4 protocol tag (`tcp`, `udp`, `any`)
    pub layer4: String,

    /// Name of the bound pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,

    #[serde(rename = "allowVlans")]
    pub allow_vlans: Vec<BTreeMap<String, String>>,

    #[serde(rename = "clientTLS")]
    pub client_tls: BTreeMap<String, String>,

    #[serde(rename = "serverTLS")]
    pub server_tls: BTreeMap<String, String>,

    #[serde(rename = "profileTCP", skip_serializing_if = "Option::is_none")]
    pub profile_tcp: Option<ProfileRef>,

    #[serde(rename = "profileHTTP", skip_serializing_if = "Option::is_none")]
    pub profile_http: Option<ProfileRef>,

    #[serde(rename = "redirect80")]
    pub redirect_80: bool,

    pub virtual_addresses: Vec<String>,

    pub virtual_port: i64,

    pub persistence_methods: Vec<String>,
}

impl VirtualServer {
    /// Typed view of the class string
    pub fn service_class(&self) -> Option<ServiceClass> {
        ServiceClass::from_class(&self.class)
    }
}
