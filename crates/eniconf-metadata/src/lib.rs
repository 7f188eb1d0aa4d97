//! Instance metadata access
//!
//! This crate reads the per-instance metadata tree that cloud instances
//! expose on a link-local endpoint (`100.100.100.200`).
//!
//! # Overview
//!
//! - [`MetadataSource`] is the read interface. Implementations provide raw
//!   lookups; typed per-field lookups (gateway, vswitch CIDR, ...) come for
//!   free.
//! - [`MetadataClient`] talks HTTP to the real endpoint.
//! - [`MetadataService`] answers from an in-memory [`InstanceMetadata`]
//!   snapshot, and [`server`] can publish a snapshot over HTTP.
//! - [`InstanceIdentity`] holds the primary MAC and other static facts.
//!
//! # Example
//!
//! ```
//! use eniconf_metadata::{InstanceMetadata, MetadataService, MetadataSource, NetworkInterface};
//! use std::net::Ipv4Addr;
//!
//! # async fn example() -> eniconf_metadata::Result<()> {
//! let service = MetadataService::new(
//!     InstanceMetadata::new("i-123456")
//!         .with_mac("aa:bb:cc:dd:ee:ff")
//!         .with_interface(
//!             NetworkInterface::new("aa:bb:cc:dd:ee:ff")
//!                 .with_gateway(Ipv4Addr::new(10, 0, 0, 1)),
//!         ),
//! );
//!
//! assert_eq!(service.macs().await?, vec!["aa:bb:cc:dd:ee:ff"]);
//! assert_eq!(service.gateway("aa:bb:cc:dd:ee:ff").await?, Ipv4Addr::new(10, 0, 0, 1));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
mod parse;
pub mod server;
pub mod service;
pub mod source;
pub mod types;

pub use client::MetadataClient;
pub use config::MetadataConfig;
pub use error::{MetadataError, Result};
pub use identity::InstanceIdentity;
pub use service::MetadataService;
pub use source::{paths, MetadataSource};
pub use types::{InstanceMetadata, NetworkInterface};
