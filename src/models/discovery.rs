//! Environment discovery record types
//!
//! Captured by the discovery wizard and attached to an existing project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Findings from an environment discovery run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    #[serde(default)]
    pub project_slug: String,

    #[serde(default)]
    pub identity: IdentityInventory,

    #[serde(default)]
    pub infrastructure: InfrastructureInventory,

    #[serde(default)]
    pub endpoints: EndpointInventory,

    #[serde(default)]
    pub security: SecurityInventory,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityInventory {
    /// e.g. "active-directory", "ldap", "entra-id"
    #[serde(default)]
    pub directory_services: Vec<String>,
    #[serde(default)]
    pub idp: String,
    #[serde(default)]
    pub mfa_enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfrastructureInventory {
    #[serde(default)]
    pub switch_vendors: Vec<String>,
    #[serde(default)]
    pub wireless_vendors: Vec<String>,
    #[serde(default)]
    pub radius_present: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointInventory {
    #[serde(default)]
    pub managed_workstations: u64,
    #[serde(default)]
    pub mobile_devices: u64,
    #[serde(default)]
    pub iot_devices: u64,
    #[serde(default)]
    pub byod_allowed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityInventory {
    /// Name of an incumbent NAC product, empty when none
    #[serde(default)]
    pub existing_nac: String,
    #[serde(default)]
    pub firewall_vendors: Vec<String>,
    #[serde(default)]
    pub siem: String,
}
