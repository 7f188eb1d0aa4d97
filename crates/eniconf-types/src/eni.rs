//! ENI record - the resolved configuration of one elastic network interface

use ipnetwork::{Ipv4Network, Ipv6Network};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// An IPv4 address with an optional IPv6 counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSet {
    pub ipv4: Ipv4Addr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Addr>,
}

impl IpSet {
    pub fn v4(ipv4: Ipv4Addr) -> Self {
        Self { ipv4, ipv6: None }
    }
}

/// An IPv4 CIDR with an optional IPv6 counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpNetSet {
    pub ipv4: Ipv4Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Network>,
}

impl IpNetSet {
    pub fn v4(ipv4: Ipv4Network) -> Self {
        Self { ipv4, ipv6: None }
    }
}

/// Resolved configuration of an elastic network interface.
///
/// `mac` and `id` each identify exactly one interface on a host. The IPv6
/// gateway and IPv6 vswitch CIDR are set together by [`Eni::with_ipv6`] or
/// not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eni {
    /// Provider-assigned interface ID (e.g. `eni-2ze...`)
    pub id: String,

    /// Hardware address
    pub mac: String,

    /// Primary private address of the interface
    pub primary_ip: IpSet,

    /// Gateway of the vswitch the interface lives in
    pub gateway_ip: IpSet,

    /// CIDR blocks of the vswitch
    pub vswitch_cidr: IpNetSet,

    /// VSwitch ID
    pub vswitch: String,
}

impl Eni {
    /// Create an IPv4-only record
    pub fn new(
        id: impl Into<String>,
        mac: impl Into<String>,
        primary_ip: Ipv4Addr,
        gateway: Ipv4Addr,
        vswitch_cidr: Ipv4Network,
        vswitch: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            mac: mac.into(),
            primary_ip: IpSet::v4(primary_ip),
            gateway_ip: IpSet::v4(gateway),
            vswitch_cidr: IpNetSet::v4(vswitch_cidr),
            vswitch: vswitch.into(),
        }
    }

    /// Attach the IPv6 gateway and vswitch CIDR
    pub fn with_ipv6(mut self, gateway: Ipv6Addr, vswitch_cidr: Ipv6Network) -> Self {
        self.gateway_ip.ipv6 = Some(gateway);
        self.vswitch_cidr.ipv6 = Some(vswitch_cidr);
        self
    }

    /// Whether the IPv6 attributes are populated
    pub fn has_ipv6(&self) -> bool {
        self.gateway_ip.ipv6.is_some() && self.vswitch_cidr.ipv6.is_some()
    }

    /// IPv6 gateway and vswitch CIDR, when both are present
    pub fn ipv6(&self) -> Option<(Ipv6Addr, Ipv6Network)> {
        self.gateway_ip.ipv6.zip(self.vswitch_cidr.ipv6)
    }
}
