//! ENI resolution
//!
//! Builds [`Eni`](eniconf_types::Eni) records for the elastic network
//! interfaces attached to this host, from any
//! [`MetadataSource`](eniconf_metadata::MetadataSource).
//!
//! # Example
//!
//! ```
//! use eniconf_metadata::{InstanceIdentity, InstanceMetadata, MetadataService, NetworkInterface};
//! use eniconf_resolver::{EniInfoGetter, EniMetadata, ResolverConfig};
//! use std::net::Ipv4Addr;
//!
//! # async fn example() -> eniconf_resolver::Result<()> {
//! let service = MetadataService::new(
//!     InstanceMetadata::new("i-123456")
//!         .with_mac("aa:bb:cc:dd:ee:ff")
//!         .with_interface(
//!             NetworkInterface::new("aa:bb:cc:dd:ee:ff")
//!                 .with_eni_id("eni-123")
//!                 .with_primary_ip(Ipv4Addr::new(10, 0, 0, 5))
//!                 .with_gateway(Ipv4Addr::new(10, 0, 0, 1))
//!                 .with_vswitch("vsw-1", "10.0.0.0/24".parse().unwrap()),
//!         ),
//! );
//!
//! let getter = EniMetadata::new(
//!     service,
//!     InstanceIdentity::new("aa:bb:cc:dd:ee:ff"),
//!     ResolverConfig::default(),
//! );
//!
//! let eni = getter.eni_by_id("eni-123").await?;
//! assert_eq!(eni.vswitch, "vsw-1");
//! assert!(getter.secondary_macs().await?.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod field;
pub mod getter;
pub mod resolver;

pub use error::{ResolveError, Result};
pub use field::EniField;
pub use getter::EniInfoGetter;
pub use resolver::{EniMetadata, ResolverConfig};
