//! Metadata source trait
//!
//! A source answers raw lookups against the metadata tree. The typed
//! per-field lookups are provided on top of [`MetadataSource::fetch`], so an
//! implementation only has to know how to reach the tree.

use async_trait::async_trait;
use ipnetwork::{Ipv4Network, Ipv6Network};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use crate::error::Result;
use crate::parse;

/// Metadata paths, relative to `latest/meta-data/`
pub mod paths {
    pub const MAC: &str = "mac";
    pub const INSTANCE_ID: &str = "instance-id";
    pub const REGION_ID: &str = "region-id";
    pub const ZONE_ID: &str = "zone-id";
    pub const INSTANCE_TYPE: &str = "instance/instance-type";
    pub const MACS: &str = "network/interfaces/macs/";

    pub const ENI_ID: &str = "network-interface-id";
    pub const PRIMARY_IP: &str = "primary-ip-address";
    pub const GATEWAY: &str = "gateway";
    pub const IPV6_GATEWAY: &str = "ipv6-gateway";
    pub const VSWITCH_CIDR: &str = "vswitch-cidr-block";
    pub const VSWITCH_IPV6_CIDR: &str = "vswitch-ipv6-cidr-block";
    pub const VSWITCH_ID: &str = "vswitch-id";
    pub const PRIVATE_IPV4S: &str = "private-ipv4s";
    pub const IPV6S: &str = "ipv6s";

    /// Path of an attribute under an interface, e.g. `network/interfaces/macs/{mac}/gateway`
    pub fn interface(mac: &str, attribute: &str) -> String {
        format!("{}{}/{}", MACS, mac, attribute)
    }
}

/// Read access to the instance metadata tree
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Raw value at `path`
    async fn fetch(&self, path: &str) -> Result<String>;

    /// MACs of all attached interfaces, in server order
    async fn macs(&self) -> Result<Vec<String>> {
        let raw = self.fetch(paths::MACS).await?;
        Ok(parse::listing(&raw))
    }

    async fn eni_id(&self, mac: &str) -> Result<String> {
        let path = paths::interface(mac, paths::ENI_ID);
        parse::scalar(&path, &self.fetch(&path).await?)
    }

    async fn primary_ip(&self, mac: &str) -> Result<Ipv4Addr> {
        let path = paths::interface(mac, paths::PRIMARY_IP);
        parse::typed(&path, &self.fetch(&path).await?)
    }

    async fn gateway(&self, mac: &str) -> Result<Ipv4Addr> {
        let path = paths::interface(mac, paths::GATEWAY);
        parse::typed(&path, &self.fetch(&path).await?)
    }

    async fn ipv6_gateway(&self, mac: &str) -> Result<Ipv6Addr> {
        let path = paths::interface(mac, paths::IPV6_GATEWAY);
        parse::typed(&path, &self.fetch(&path).await?)
    }

    async fn vswitch_cidr(&self, mac: &str) -> Result<Ipv4Network> {
        let path = paths::interface(mac, paths::VSWITCH_CIDR);
        parse::typed(&path, &self.fetch(&path).await?)
    }

    async fn vswitch_ipv6_cidr(&self, mac: &str) -> Result<Ipv6Network> {
        let path = paths::interface(mac, paths::VSWITCH_IPV6_CIDR);
        parse::typed(&path, &self.fetch(&path).await?)
    }

    async fn vswitch_id(&self, mac: &str) -> Result<String> {
        let path = paths::interface(mac, paths::VSWITCH_ID);
        parse::scalar(&path, &self.fetch(&path).await?)
    }

    async fn private_ipv4s(&self, mac: &str) -> Result<Vec<Ipv4Addr>> {
        let path = paths::interface(mac, paths::PRIVATE_IPV4S);
        parse::address_list(&path, &self.fetch(&path).await?)
    }

    async fn private_ipv6s(&self, mac: &str) -> Result<Vec<Ipv6Addr>> {
        let path = paths::interface(mac, paths::IPV6S);
        parse::address_list(&path, &self.fetch(&path).await?)
    }

    /// MAC of the interface the instance booted with
    async fn primary_mac(&self) -> Result<String> {
        parse::scalar(paths::MAC, &self.fetch(paths::MAC).await?)
    }

    async fn instance_id(&self) -> Result<String> {
        parse::scalar(paths::INSTANCE_ID, &self.fetch(paths::INSTANCE_ID).await?)
    }

    async fn region_id(&self) -> Result<String> {
        parse::scalar(paths::REGION_ID, &self.fetch(paths::REGION_ID).await?)
    }

    async fn zone_id(&self) -> Result<String> {
        parse::scalar(paths::ZONE_ID, &self.fetch(paths::ZONE_ID).await?)
    }

    async fn instance_type(&self) -> Result<String> {
        parse::scalar(
            paths::INSTANCE_TYPE,
            &self.fetch(paths::INSTANCE_TYPE).await?,
        )
    }
}

// Forward every method so overrides on `T` are kept.
#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<String> {
        (**self).fetch(path).await
    }

    async fn macs(&self) -> Result<Vec<String>> {
        (**self).macs().await
    }

    async fn eni_id(&self, mac: &str) -> Result<String> {
        (**self).eni_id(mac).await
    }

    async fn primary_ip(&self, mac: &str) -> Result<Ipv4Addr> {
        (**self).primary_ip(mac).await
    }

    async fn gateway(&self, mac: &str) -> Result<Ipv4Addr> {
        (**self).gateway(mac).await
    }

    async fn ipv6_gateway(&self, mac: &str) -> Result<Ipv6Addr> {
        (**self).ipv6_gateway(mac).await
    }

    async fn vswitch_cidr(&self, mac: &str) -> Result<Ipv4Network> {
        (**self).vswitch_cidr(mac).await
    }

    async fn vswitch_ipv6_cidr(&self, mac: &str) -> Result<Ipv6Network> {
        (**self).vswitch_ipv6_cidr(mac).await
    }

    async fn vswitch_id(&self, mac: &str) -> Result<String> {
        (**self).vswitch_id(mac).await
    }

    async fn private_ipv4s(&self, mac: &str) -> Result<Vec<Ipv4Addr>> {
        (**self).private_ipv4s(mac).await
    }

    async fn private_ipv6s(&self, mac: &str) -> Result<Vec<Ipv6Addr>> {
        (**self).private_ipv6s(mac).await
    }

    async fn primary_mac(&self) -> Result<String> {
        (**self).primary_mac().await
    }

    async fn instance_id(&self) -> Result<String> {
        (**self).instance_id().await
    }

    async fn region_id(&self) -> Result<String> {
        (**self).region_id().await
    }

    async fn zone_id(&self) -> Result<String> {
        (**self).zone_id().await
    }

    async fn instance_type(&self) -> Result<String> {
        (**self).instance_type().await
    }
}
