//! SIP outbound trunk records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trunk as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrunkDescriptor {
    /// Platform-assigned identifier (`ST_...`).
    pub sip_trunk_id: String,
    /// Human-readable name.
    pub name: String,
    /// SIP signaling address of the provider.
    pub address: String,
    /// Phone numbers calls may be placed from.
    pub numbers: Vec<String>,
    /// Provider auth username. The password is never read back.
    #[serde(default)]
    pub auth_username: String,
}

/// Parameters for creating a new outbound trunk.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrunkSpec {
    pub name: String,
    pub address: String,
    pub numbers: Vec<String>,
    pub auth_username: String,
    #[serde(skip_serializing)]
    pub auth_password: String,
}

impl fmt::Debug for TrunkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrunkSpec")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("numbers", &self.numbers)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &"[REDACTED]")
            .finish()
    }
}
