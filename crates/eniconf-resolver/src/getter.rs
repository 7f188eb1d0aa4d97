//! ENI info getter trait

use async_trait::async_trait;
use eniconf_types::Eni;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::Result;

/// Read access to the ENIs attached to this host
///
/// [`EniMetadata`](crate::EniMetadata) is the implementation backed by
/// instance metadata; the trait exists so callers can be tested against a
/// stand-in.
#[async_trait]
pub trait EniInfoGetter: Send + Sync {
    /// Build the full record of the interface with this MAC.
    ///
    /// Fails on the first attribute that cannot be resolved; a partial
    /// record is never returned.
    async fn eni_by_mac(&self, mac: &str) -> Result<Eni>;

    /// Find the attached interface with this ID
    async fn eni_by_id(&self, id: &str) -> Result<Eni>;

    /// Private IPv4 addresses assigned to the interface
    async fn private_ipv4s_by_mac(&self, mac: &str) -> Result<Vec<Ipv4Addr>>;

    /// Private IPv6 addresses assigned to the interface
    async fn private_ipv6s_by_mac(&self, mac: &str) -> Result<Vec<Ipv6Addr>>;

    /// Records of all attached interfaces, optionally including the primary one
    async fn attached_enis(&self, include_main: bool) -> Result<Vec<Eni>>;

    /// MACs of all attached interfaces except the primary one
    async fn secondary_macs(&self) -> Result<Vec<String>>;
}
