//! Monitor domain types

use serde::Serialize;

/// Health-check definition referenced by pools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Key under which the entry appeared in its application
    pub name: String,

    pub class: String,

    /// Cipher string for HTTPS monitors
    pub ciphers: String,

    /// Seconds between checks
    pub interval: i64,

    /// Monitor type (`http`, `https`, `tcp`, `icmp`, ...)
    pub monitor_type: String,

    /// Expected response for an up member
    pub receive: String,

    /// Response that marks the member down
    pub receive_down: String,

    /// Request string sent to the member
    pub send: String,

    /// Seconds without a valid response before the member is marked down, as
    /// written in the declaration (`"16"`)
    pub timeout: String,
}
