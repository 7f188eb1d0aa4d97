//! ENI resolution over instance metadata
//!
//! [`EniMetadata`] composes a [`MetadataSource`] and the host's
//! [`InstanceIdentity`] into [`Eni`] records. It keeps no state beyond its
//! construction inputs: every call re-runs its full query sequence, one
//! lookup at a time, and nothing is cached.

use async_trait::async_trait;
use eniconf_metadata::{InstanceIdentity, MetadataSource};
use eniconf_types::{Eni, IpFamily};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::field::EniField;
use crate::getter::EniInfoGetter;

/// Resolver configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Address families to resolve
    pub ip_family: IpFamily,

    /// Carried for link setup code that consumes the resolver; resolution
    /// itself does not look at it.
    pub ignore_link_not_exist: bool,
}

impl ResolverConfig {
    pub fn new(ip_family: IpFamily) -> Self {
        Self {
            ip_family,
            ignore_link_not_exist: false,
        }
    }

    pub fn with_ignore_link_not_exist(mut self, ignore: bool) -> Self {
        self.ignore_link_not_exist = ignore;
        self
    }
}

/// [`EniInfoGetter`] backed by instance metadata
#[derive(Debug, Clone)]
pub struct EniMetadata<S> {
    source: S,
    identity: InstanceIdentity,
    config: ResolverConfig,
}

impl<S: MetadataSource> EniMetadata<S> {
    pub fn new(source: S, identity: InstanceIdentity, config: ResolverConfig) -> Self {
        Self {
            source,
            identity,
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    pub fn ip_family(&self) -> IpFamily {
        self.config.ip_family
    }

    pub fn ignore_link_not_exist(&self) -> bool {
        self.config.ignore_link_not_exist
    }

    async fn attached_macs(&self) -> Result<Vec<String>> {
        self.source.macs().await.map_err(ResolveError::AttachedMacs)
    }

    fn is_primary(&self, mac: &str) -> bool {
        mac == self.identity.primary_mac
    }
}

#[async_trait]
impl<S: MetadataSource> EniInfoGetter for EniMetadata<S> {
    async fn eni_by_mac(&self, mac: &str) -> Result<Eni> {
        debug!(mac = %mac, ipv6 = self.config.ip_family.ipv6, "Resolving eni");
        let id = self
            .source
            .eni_id(mac)
            .await
            .map_err(ResolveError::lookup(EniField::Id, mac))?;
        let primary_ip = self
            .source
            .primary_ip(mac)
            .await
            .map_err(ResolveError::lookup(EniField::PrimaryIp, mac))?;
        let gateway = self
            .source
            .gateway(mac)
            .await
            .map_err(ResolveError::lookup(EniField::Gateway, mac))?;
        let vswitch_cidr = self
            .source
            .vswitch_cidr(mac)
            .await
            .map_err(ResolveError::lookup(EniField::VswitchCidr, mac))?;
        let vswitch = self
            .source
            .vswitch_id(mac)
            .await
            .map_err(ResolveError::lookup(EniField::VswitchId, mac))?;

        let mut eni = Eni::new(id, mac, primary_ip, gateway, vswitch_cidr, vswitch);

        if self.config.ip_family.ipv6 {
            let ipv6_gateway = self
                .source
                .ipv6_gateway(mac)
                .await
                .map_err(ResolveError::lookup(EniField::Ipv6Gateway, mac))?;
            let ipv6_cidr = self
                .source
                .vswitch_ipv6_cidr(mac)
                .await
                .map_err(ResolveError::lookup(EniField::VswitchIpv6Cidr, mac))?;
            eni = eni.with_ipv6(ipv6_gateway, ipv6_cidr);
        }

        debug!(id = %eni.id, vswitch = %eni.vswitch, "Resolved eni");
        Ok(eni)
    }

    /// Scans every attached MAC and resolves its ID until one matches.
    ///
    /// This is a full rescan per call, which is fine for the handful of
    /// interfaces a host can carry but would need an index beyond that. IDs
    /// are unique per host, so the first match is returned without checking
    /// the remaining interfaces.
    async fn eni_by_id(&self, id: &str) -> Result<Eni> {
        debug!(id = %id, "Looking up eni by id");
        for mac in self.attached_macs().await? {
            let candidate = self
                .source
                .eni_id(&mac)
                .await
                .map_err(ResolveError::lookup(EniField::Id, &mac))?;
            if candidate == id {
                debug!(mac = %mac, "Matched eni id");
                return self.eni_by_mac(&mac).await;
            }
        }
        Err(ResolveError::NotFound { id: id.to_string() })
    }

    async fn private_ipv4s_by_mac(&self, mac: &str) -> Result<Vec<Ipv4Addr>> {
        self.source
            .private_ipv4s(mac)
            .await
            .map_err(ResolveError::lookup(EniField::PrivateIpv4s, mac))
    }

    async fn private_ipv6s_by_mac(&self, mac: &str) -> Result<Vec<Ipv6Addr>> {
        self.source
            .private_ipv6s(mac)
            .await
            .map_err(ResolveError::lookup(EniField::PrivateIpv6s, mac))
    }

    async fn attached_enis(&self, include_main: bool) -> Result<Vec<Eni>> {
        let macs = self.attached_macs().await?;
        debug!(count = macs.len(), include_main, "Resolving attached enis");
        let mut enis = Vec::with_capacity(macs.len());
        for mac in macs {
            if !include_main && self.is_primary(&mac) {
                continue;
            }
            enis.push(self.eni_by_mac(&mac).await?);
        }
        Ok(enis)
    }

    async fn secondary_macs(&self) -> Result<Vec<String>> {
        let macs = self.attached_macs().await?;
        Ok(macs.into_iter().filter(|mac| !self.is_primary(mac)).collect())
    }
}
