use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use eniconf_metadata::{server, InstanceMetadata, MetadataService};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// JSON snapshot to serve
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,
}

/// Serve a snapshot until Ctrl+C
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let metadata = InstanceMetadata::load(&args.snapshot)
        .wrap_err_with(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    info!(
        instance_id = %metadata.instance_id,
        interfaces = metadata.network_interfaces.len(),
        "Loaded metadata snapshot"
    );

    tokio::select! {
        result = server::serve(MetadataService::new(metadata), args.listen) => {
            result.wrap_err("Metadata server failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down");
        }
    }
    Ok(())
}
