//! Metadata snapshot types
//!
//! An [`InstanceMetadata`] is a point-in-time copy of the parts of the
//! metadata tree this workspace reads. It backs the in-memory
//! [`MetadataService`](crate::service::MetadataService) and can be loaded
//! from a JSON file.

use ipnetwork::{Ipv4Network, Ipv6Network};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;

use crate::error::{MetadataError, Result};

/// Instance metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceMetadata {
    /// Unique instance ID
    pub instance_id: String,

    /// Region the instance runs in
    #[serde(default)]
    pub region_id: Option<String>,

    /// Zone the instance runs in
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Instance type/size
    #[serde(default)]
    pub instance_type: Option<String>,

    /// MAC address of the primary interface
    #[serde(default)]
    pub mac: Option<String>,

    /// Attached network interfaces, in listing order
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterface>,
}

impl InstanceMetadata {
    /// Create new instance metadata with required fields
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Default::default()
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MetadataError::Serialization(e.to_string()))
    }

    /// Read a JSON snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MetadataError::Serialization(e.to_string()))
    }

    /// Set primary MAC address
    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = Some(mac.into());
        self
    }

    /// Set region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_id = Some(region.into());
        self
    }

    /// Set zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone_id = Some(zone.into());
        self
    }

    /// Set instance type
    pub fn with_instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    /// Add a network interface
    pub fn with_interface(mut self, iface: NetworkInterface) -> Self {
        self.network_interfaces.push(iface);
        self
    }

    /// Find an interface by MAC
    pub fn interface(&self, mac: &str) -> Option<&NetworkInterface> {
        self.network_interfaces.iter().find(|i| i.mac == mac)
    }
}

/// Network interface metadata.
///
/// Every attribute is optional so a snapshot can describe an interface whose
/// metadata is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// MAC address
    pub mac: String,

    #[serde(default)]
    pub eni_id: Option<String>,

    #[serde(default)]
    pub primary_ip: Option<Ipv4Addr>,

    #[serde(default)]
    pub gateway: Option<Ipv4Addr>,

    #[serde(default)]
    pub ipv6_gateway: Option<Ipv6Addr>,

    #[serde(default)]
    pub vswitch_id: Option<String>,

    #[serde(default)]
    pub vswitch_cidr: Option<Ipv4Network>,

    #[serde(default)]
    pub vswitch_ipv6_cidr: Option<Ipv6Network>,

    /// Private IPv4 addresses, primary first
    #[serde(default)]
    pub private_ipv4s: Vec<Ipv4Addr>,

    /// IPv6 addresses
    #[serde(default)]
    pub ipv6s: Vec<Ipv6Addr>,
}

impl NetworkInterface {
    /// Create new network interface
    pub fn new(mac: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            ..Default::default()
        }
    }

    /// Set the ENI ID
    pub fn with_eni_id(mut self, id: impl Into<String>) -> Self {
        self.eni_id = Some(id.into());
        self
    }

    /// Set the primary IPv4 address; it is also listed as a private address
    pub fn with_primary_ip(mut self, ip: Ipv4Addr) -> Self {
        self.primary_ip = Some(ip);
        if !self.private_ipv4s.contains(&ip) {
            self.private_ipv4s.insert(0, ip);
        }
        self
    }

    /// Set gateway
    pub fn with_gateway(mut self, gw: Ipv4Addr) -> Self {
        self.gateway = Some(gw);
        self
    }

    /// Set vswitch ID and IPv4 CIDR
    pub fn with_vswitch(mut self, id: impl Into<String>, cidr: Ipv4Network) -> Self {
        self.vswitch_id = Some(id.into());
        self.vswitch_cidr = Some(cidr);
        self
    }

    /// Set IPv6 gateway
    pub fn with_ipv6_gateway(mut self, gw: Ipv6Addr) -> Self {
        self.ipv6_gateway = Some(gw);
        self
    }

    /// Set vswitch IPv6 CIDR
    pub fn with_vswitch_ipv6_cidr(mut self, cidr: Ipv6Network) -> Self {
        self.vswitch_ipv6_cidr = Some(cidr);
        self
    }

    /// Add a secondary private IPv4 address
    pub fn with_private_ipv4(mut self, ip: Ipv4Addr) -> Self {
        self.private_ipv4s.push(ip);
        self
    }

    /// Add an IPv6 address
    pub fn with_ipv6(mut self, ip: Ipv6Addr) -> Self {
        self.ipv6s.push(ip);
        self
    }
}
