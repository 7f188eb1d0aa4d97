use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use eniconf_metadata::{
    InstanceIdentity, InstanceMetadata, MetadataClient, MetadataConfig, MetadataService,
    MetadataSource,
};
use eniconf_resolver::{EniMetadata, ResolverConfig};
use eniconf_types::IpFamily;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Where metadata is read from and how it is resolved
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Metadata endpoint
    #[arg(
        long,
        env = "ENICONF_METADATA_ENDPOINT",
        default_value = eniconf_metadata::config::DEFAULT_ENDPOINT
    )]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "ENICONF_METADATA_TIMEOUT", default_value_t = 5)]
    pub timeout_secs: u64,

    /// IP stack of the host: ipv4, ipv6 or dual
    #[arg(long, env = "ENICONF_IP_STACK", default_value = "ipv4")]
    pub ip_stack: IpFamily,

    /// Read metadata from a JSON snapshot instead of the endpoint
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Tolerate interfaces whose link is missing during setup
    #[arg(long)]
    pub ignore_link_not_exist: bool,
}

pub type SharedSource = Arc<dyn MetadataSource>;

impl SourceArgs {
    pub fn metadata_config(&self) -> MetadataConfig {
        MetadataConfig::new()
            .with_endpoint(self.endpoint.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.ip_stack).with_ignore_link_not_exist(self.ignore_link_not_exist)
    }

    /// Open the snapshot if one was given, the HTTP endpoint otherwise
    pub fn open(&self) -> Result<SharedSource> {
        match &self.snapshot {
            Some(path) => {
                debug!(path = %path.display(), "Using metadata snapshot");
                let metadata = InstanceMetadata::load(path)
                    .wrap_err_with(|| format!("Failed to load snapshot {}", path.display()))?;
                Ok(Arc::new(MetadataService::new(metadata)))
            }
            None => {
                debug!(endpoint = %self.endpoint, "Using metadata endpoint");
                let client = MetadataClient::new(self.metadata_config())
                    .wrap_err("Failed to build metadata client")?;
                Ok(Arc::new(client))
            }
        }
    }

    /// Open the source and build a resolver for this host
    pub async fn resolver(&self) -> Result<EniMetadata<SharedSource>> {
        let source = self.open()?;
        let identity = InstanceIdentity::load(&source)
            .await
            .wrap_err("Failed to load instance identity")?;
        debug!(primary_mac = %identity.primary_mac, "Loaded instance identity");
        Ok(EniMetadata::new(source, identity, self.resolver_config()))
    }
}
