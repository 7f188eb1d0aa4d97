//! Instance identity
//!
//! The handful of per-instance facts that do not change while the instance
//! runs. Load it once at startup and hand it to whatever needs it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::source::MetadataSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceIdentity {
    /// MAC of the interface the instance booted with
    pub primary_mac: String,
    pub instance_id: Option<String>,
    pub region_id: Option<String>,
    pub zone_id: Option<String>,
    pub instance_type: Option<String>,
}

impl InstanceIdentity {
    pub fn new(primary_mac: impl Into<String>) -> Self {
        Self {
            primary_mac: primary_mac.into(),
            instance_id: None,
            region_id: None,
            zone_id: None,
            instance_type: None,
        }
    }

    pub fn with_instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_id = Some(region.into());
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone_id = Some(zone.into());
        self
    }

    pub fn with_instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    /// Read the identity from a metadata source.
    ///
    /// The primary MAC is required. The remaining fields are left empty when
    /// the source does not know them; any other failure is returned.
    pub async fn load<S: MetadataSource + ?Sized>(source: &S) -> Result<Self> {
        let primary_mac = source.primary_mac().await?;

        let identity = Self {
            primary_mac,
            instance_id: optional(source.instance_id().await)?,
            region_id: optional(source.region_id().await)?,
            zone_id: optional(source.zone_id().await)?,
            instance_type: optional(source.instance_type().await)?,
        };

        debug!(
            primary_mac = %identity.primary_mac,
            instance_id = ?identity.instance_id,
            "Loaded instance identity"
        );
        Ok(identity)
    }
}

fn optional(value: Result<String>) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use crate::service::MetadataService;
    use crate::types::InstanceMetadata;
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_load_full_identity() {
        let service = MetadataService::new(
            InstanceMetadata::new("i-123456")
                .with_mac("aa:bb:cc:dd:ee:01")
                .with_region("cn-hangzhou")
                .with_zone("cn-hangzhou-k")
                .with_instance_type("ecs.g7.large"),
        );

        let identity = InstanceIdentity::load(&service).await.unwrap();
        assert_eq!(
            identity,
            InstanceIdentity::new("aa:bb:cc:dd:ee:01")
                .with_instance_id("i-123456")
                .with_region("cn-hangzhou")
                .with_zone("cn-hangzhou-k")
                .with_instance_type("ecs.g7.large")
        );
    }

    #[tokio::test]
    async fn test_load_sparse_identity() {
        let service =
            MetadataService::new(InstanceMetadata::new("i-1").with_mac("aa:bb:cc:dd:ee:01"));

        let identity = InstanceIdentity::load(&service).await.unwrap();
        assert_eq!(identity.primary_mac, "aa:bb:cc:dd:ee:01");
        assert_eq!(identity.instance_id.as_deref(), Some("i-1"));
        assert!(identity.region_id.is_none());
        assert!(identity.zone_id.is_none());
    }

    #[tokio::test]
    async fn test_primary_mac_required() {
        let service = MetadataService::new(InstanceMetadata::new("i-1"));

        let err = InstanceIdentity::load(&service).await.unwrap_err();
        assert!(err.is_not_found());
    }

    struct BrokenRegion;

    #[async_trait]
    impl MetadataSource for BrokenRegion {
        async fn fetch(&self, path: &str) -> Result<String> {
            match path {
                "mac" => Ok("m1".to_string()),
                "region-id" => Err(MetadataError::Status {
                    path: path.to_string(),
                    status: 500,
                }),
                _ => Err(MetadataError::NotFound(path.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_optional_field_failure_propagates() {
        let err = InstanceIdentity::load(&BrokenRegion).await.unwrap_err();
        assert!(matches!(err, MetadataError::Status { status: 500, .. }));
    }
}
