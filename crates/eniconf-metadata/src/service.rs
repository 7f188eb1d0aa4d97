//! In-memory metadata service
//!
//! Serves the metadata tree from an [`InstanceMetadata`] snapshot. The
//! responses use the same formats as the real server, so everything built on
//! [`MetadataSource`] behaves the same against either.
//!
//! Supported paths (relative to `latest/meta-data/`):
//! - `instance-id`, `region-id`, `zone-id`, `mac`
//! - `instance/instance-type`
//! - `network/interfaces/macs/`
//! - `network/interfaces/macs/{mac}/` and its attributes

use async_trait::async_trait;

use crate::error::{MetadataError, Result};
use crate::source::{paths, MetadataSource};
use crate::types::{InstanceMetadata, NetworkInterface};

/// Metadata service for a single instance snapshot
#[derive(Debug, Clone)]
pub struct MetadataService {
    metadata: InstanceMetadata,
}

impl MetadataService {
    /// Create a new metadata service for an instance
    pub fn new(metadata: InstanceMetadata) -> Self {
        Self { metadata }
    }

    /// Get the instance metadata
    pub fn metadata(&self) -> &InstanceMetadata {
        &self.metadata
    }

    /// Resolve a metadata path to its value
    ///
    /// Accepts paths with or without the `latest/meta-data/` prefix. A value
    /// that is not configured in the snapshot resolves to
    /// [`MetadataError::NotFound`].
    pub fn resolve(&self, path: &str) -> Result<String> {
        let path = path
            .trim_start_matches('/')
            .trim_start_matches("latest/")
            .trim_start_matches("meta-data");
        let path = path.trim_start_matches('/');

        match path {
            "" => Ok(self.root_listing()),

            "instance-id" => Ok(self.metadata.instance_id.clone()),

            "mac" => self.metadata.mac.clone().ok_or_else(|| not_found(path)),

            "region-id" => self
                .metadata
                .region_id
                .clone()
                .ok_or_else(|| not_found(path)),

            "zone-id" => self.metadata.zone_id.clone().ok_or_else(|| not_found(path)),

            "instance" | "instance/" => Ok("instance-type".to_string()),

            "instance/instance-type" => self
                .metadata
                .instance_type
                .clone()
                .ok_or_else(|| not_found(path)),

            "network" | "network/" => Ok("interfaces/".to_string()),

            "network/interfaces" | "network/interfaces/" => Ok("macs/".to_string()),

            "network/interfaces/macs" | "network/interfaces/macs/" => Ok(self.macs_listing()),

            path if path.starts_with(paths::MACS) => self.resolve_interface_path(path),

            _ => Err(MetadataError::InvalidPath(path.to_string())),
        }
    }

    fn root_listing(&self) -> String {
        let mut items = vec!["instance-id", "instance/"];
        if self.metadata.mac.is_some() {
            items.push("mac");
        }
        if self.metadata.region_id.is_some() {
            items.push("region-id");
        }
        if self.metadata.zone_id.is_some() {
            items.push("zone-id");
        }
        items.push("network/");
        items.join("\n")
    }

    fn macs_listing(&self) -> String {
        self.metadata
            .network_interfaces
            .iter()
            .map(|i| format!("{}/", i.mac))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Resolve `network/interfaces/macs/{mac}[/{attribute}]`
    fn resolve_interface_path(&self, full_path: &str) -> Result<String> {
        let rest = full_path.trim_start_matches(paths::MACS);
        let (mac, attribute) = match rest.split_once('/') {
            Some((mac, attribute)) => (mac, attribute.trim_end_matches('/')),
            None => (rest, ""),
        };

        let iface = self
            .metadata
            .interface(mac)
            .ok_or_else(|| not_found(full_path))?;

        match attribute {
            "" => Ok(interface_listing(iface)),
            paths::ENI_ID => iface.eni_id.clone().ok_or_else(|| not_found(full_path)),
            paths::PRIMARY_IP => iface
                .primary_ip
                .map(|ip| ip.to_string())
                .ok_or_else(|| not_found(full_path)),
            paths::GATEWAY => iface
                .gateway
                .map(|ip| ip.to_string())
                .ok_or_else(|| not_found(full_path)),
            paths::IPV6_GATEWAY => iface
                .ipv6_gateway
                .map(|ip| ip.to_string())
                .ok_or_else(|| not_found(full_path)),
            paths::VSWITCH_ID => iface
                .vswitch_id
                .clone()
                .ok_or_else(|| not_found(full_path)),
            paths::VSWITCH_CIDR => iface
                .vswitch_cidr
                .map(|cidr| cidr.to_string())
                .ok_or_else(|| not_found(full_path)),
            paths::VSWITCH_IPV6_CIDR => iface
                .vswitch_ipv6_cidr
                .map(|cidr| cidr.to_string())
                .ok_or_else(|| not_found(full_path)),
            // the real server quotes IPv4 entries but not IPv6 ones
            paths::PRIVATE_IPV4S => Ok(format!(
                "[{}]",
                iface
                    .private_ipv4s
                    .iter()
                    .map(|ip| format!("\"{}\"", ip))
                    .collect::<Vec<_>>()
                    .join(",")
            )),
            paths::IPV6S => Ok(format!(
                "[{}]",
                iface
                    .ipv6s
                    .iter()
                    .map(|ip| ip.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            )),
            _ => Err(MetadataError::InvalidPath(full_path.to_string())),
        }
    }
}

/// Generate interface listing
fn interface_listing(iface: &NetworkInterface) -> String {
    let mut items = vec![paths::PRIVATE_IPV4S];
    if iface.eni_id.is_some() {
        items.push(paths::ENI_ID);
    }
    if iface.primary_ip.is_some() {
        items.push(paths::PRIMARY_IP);
    }
    if iface.gateway.is_some() {
        items.push(paths::GATEWAY);
    }
    if iface.vswitch_id.is_some() {
        items.push(paths::VSWITCH_ID);
    }
    if iface.vswitch_cidr.is_some() {
        items.push(paths::VSWITCH_CIDR);
    }
    if iface.ipv6_gateway.is_some() {
        items.push(paths::IPV6_GATEWAY);
    }
    if iface.vswitch_ipv6_cidr.is_some() {
        items.push(paths::VSWITCH_IPV6_CIDR);
    }
    if !iface.ipv6s.is_empty() {
        items.push(paths::IPV6S);
    }
    items.join("\n")
}

fn not_found(path: &str) -> MetadataError {
    MetadataError::NotFound(path.to_string())
}

#[async_trait]
impl MetadataSource for MetadataService {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.resolve(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn test_metadata() -> InstanceMetadata {
        InstanceMetadata::new("i-123456")
            .with_mac("aa:bb:cc:dd:ee:01")
            .with_region("cn-hangzhou")
            .with_instance_type("ecs.g7.large")
            .with_interface(
                NetworkInterface::new("aa:bb:cc:dd:ee:01")
                    .with_eni_id("eni-primary")
                    .with_primary_ip(Ipv4Addr::new(10, 0, 0, 5))
                    .with_gateway(Ipv4Addr::new(10, 0, 0, 1))
                    .with_vswitch("vsw-1", "10.0.0.0/24".parse().unwrap()),
            )
            .with_interface(
                NetworkInterface::new("aa:bb:cc:dd:ee:02")
                    .with_eni_id("eni-secondary")
                    .with_primary_ip(Ipv4Addr::new(10, 0, 1, 5))
                    .with_private_ipv4(Ipv4Addr::new(10, 0, 1, 6))
                    .with_gateway(Ipv4Addr::new(10, 0, 1, 1))
                    .with_vswitch("vsw-2", "10.0.1.0/24".parse().unwrap())
                    .with_ipv6_gateway("fd00:1::1".parse().unwrap())
                    .with_vswitch_ipv6_cidr("fd00:1::/64".parse().unwrap())
                    .with_ipv6("fd00:1::5".parse().unwrap()),
            )
    }

    #[test]
    fn test_resolve_instance_paths() {
        let service = MetadataService::new(test_metadata());

        assert_eq!(service.resolve("instance-id").unwrap(), "i-123456");
        assert_eq!(
            service.resolve("/latest/meta-data/instance-id").unwrap(),
            "i-123456"
        );
        assert_eq!(service.resolve("mac").unwrap(), "aa:bb:cc:dd:ee:01");
        assert_eq!(service.resolve("region-id").unwrap(), "cn-hangzhou");
        assert_eq!(
            service.resolve("instance/instance-type").unwrap(),
            "ecs.g7.large"
        );
    }

    #[test]
    fn test_unconfigured_value_is_not_found() {
        let service = MetadataService::new(test_metadata());

        let err = service.resolve("zone-id").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_path() {
        let service = MetadataService::new(test_metadata());

        assert!(matches!(
            service.resolve("nonexistent"),
            Err(MetadataError::InvalidPath(_))
        ));
        assert!(matches!(
            service.resolve("network/interfaces/macs/aa:bb:cc:dd:ee:01/bogus"),
            Err(MetadataError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_listings() {
        let service = MetadataService::new(test_metadata());

        let root = service.resolve("").unwrap();
        assert!(root.contains("instance-id"));
        assert!(root.contains("network/"));
        assert!(!root.contains("zone-id"));

        assert_eq!(
            service.resolve("network/interfaces/macs/").unwrap(),
            "aa:bb:cc:dd:ee:01/\naa:bb:cc:dd:ee:02/"
        );

        let iface = service
            .resolve("network/interfaces/macs/aa:bb:cc:dd:ee:01/")
            .unwrap();
        assert!(iface.contains("network-interface-id"));
        assert!(!iface.contains("ipv6-gateway"));
    }

    #[test]
    fn test_interface_attributes() {
        let service = MetadataService::new(test_metadata());
        let base = "network/interfaces/macs/aa:bb:cc:dd:ee:02";

        assert_eq!(
            service.resolve(&format!("{base}/network-interface-id")).unwrap(),
            "eni-secondary"
        );
        assert_eq!(
            service.resolve(&format!("{base}/vswitch-cidr-block")).unwrap(),
            "10.0.1.0/24"
        );
        assert_eq!(
            service.resolve(&format!("{base}/ipv6-gateway")).unwrap(),
            "fd00:1::1"
        );
        assert_eq!(
            service.resolve(&format!("{base}/private-ipv4s")).unwrap(),
            r#"["10.0.1.5","10.0.1.6"]"#
        );
        assert_eq!(
            service.resolve(&format!("{base}/ipv6s")).unwrap(),
            "[fd00:1::5]"
        );
    }

    #[test]
    fn test_unknown_interface() {
        let service = MetadataService::new(test_metadata());

        let err = service
            .resolve("network/interfaces/macs/00:00:00:00:00:00/gateway")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_as_metadata_source() {
        let service = MetadataService::new(test_metadata());

        assert_eq!(
            service.macs().await.unwrap(),
            vec!["aa:bb:cc:dd:ee:01", "aa:bb:cc:dd:ee:02"]
        );
        assert_eq!(
            service.private_ipv4s("aa:bb:cc:dd:ee:02").await.unwrap(),
            vec![Ipv4Addr::new(10, 0, 1, 5), Ipv4Addr::new(10, 0, 1, 6)]
        );
        assert_eq!(
            service.private_ipv6s("aa:bb:cc:dd:ee:02").await.unwrap(),
            vec!["fd00:1::5".parse::<Ipv6Addr>().unwrap()]
        );
        assert!(service
            .private_ipv6s("aa:bb:cc:dd:ee:01")
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .ipv6_gateway("aa:bb:cc:dd:ee:01")
            .await
            .unwrap_err()
            .is_not_found());
    }
}
