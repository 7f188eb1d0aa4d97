//! ENI attributes looked up from metadata

use std::fmt;

/// An attribute the resolver queries, used to report which lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EniField {
    /// Interface ID
    Id,
    /// Primary IPv4 address
    PrimaryIp,
    /// IPv4 gateway
    Gateway,
    /// VSwitch IPv4 CIDR
    VswitchCidr,
    /// VSwitch ID
    VswitchId,
    /// IPv6 gateway
    Ipv6Gateway,
    /// VSwitch IPv6 CIDR
    VswitchIpv6Cidr,
    /// Private IPv4 addresses
    PrivateIpv4s,
    /// Private IPv6 addresses
    PrivateIpv6s,
    /// The list of attached interfaces
    AttachedMacs,
}

impl fmt::Display for EniField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EniField::Id => "id",
            EniField::PrimaryIp => "primary ip",
            EniField::Gateway => "gateway",
            EniField::VswitchCidr => "vswitch cidr",
            EniField::VswitchId => "vswitch id",
            EniField::Ipv6Gateway => "ipv6 gateway",
            EniField::VswitchIpv6Cidr => "vswitch ipv6 cidr",
            EniField::PrivateIpv4s => "private ipv4 addresses",
            EniField::PrivateIpv6s => "private ipv6 addresses",
            EniField::AttachedMacs => "attached macs",
        };
        f.write_str(name)
    }
}
