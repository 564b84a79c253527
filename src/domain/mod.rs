//! Domain layer
//!
//! Strongly-typed model of a decoded AS3 declaration. The tree is exactly
//! four levels deep:
//!
//! ```text
//! Declaration → Tenant → Application → { VirtualServer, Monitor, Pool }
//! ```
//!
//! Every entity below the root is identified by the key it appeared under in
//! its parent, never by a field inside its own value. Entities hold no
//! back-references to their parents.

pub mod declaration;
pub mod monitor;
pub mod pool;
pub mod virtual_server;

pub use declaration::{Application, Declaration, Tenant};
pub use monitor::Monitor;
pub use pool::{Member, Pool};
pub use virtual_server::{ProfileRef, ServiceClass, VirtualServer};
