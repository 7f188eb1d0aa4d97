use clap::Args;
use color_eyre::eyre::Result;
use eniconf_resolver::EniInfoGetter;
use tracing::info;

use super::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// MAC address of the interface
    pub mac: String,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// ENI ID, e.g. eni-2zeabc
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include the primary interface
    #[arg(long)]
    pub include_main: bool,
}

#[derive(Args, Debug)]
pub struct PrivateIpsArgs {
    /// MAC address of the interface
    pub mac: String,

    /// List IPv6 addresses instead of IPv4
    #[arg(long)]
    pub ipv6: bool,
}

pub async fn run_show<G: EniInfoGetter>(getter: &G, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let eni = getter.eni_by_mac(&args.mac).await?;
    output::emit(format, &eni, output::eni_text)
}

pub async fn run_find<G: EniInfoGetter>(getter: &G, args: FindArgs, format: OutputFormat) -> Result<()> {
    let eni = getter.eni_by_id(&args.id).await?;
    output::emit(format, &eni, output::eni_text)
}

pub async fn run_list<G: EniInfoGetter>(getter: &G, args: ListArgs, format: OutputFormat) -> Result<()> {
    let enis = getter.attached_enis(args.include_main).await?;
    info!(count = enis.len(), include_main = args.include_main, "Listed attached enis");
    output::emit(format, &enis, |enis| output::eni_table(enis))
}

pub async fn run_secondary_macs<G: EniInfoGetter>(getter: &G, format: OutputFormat) -> Result<()> {
    let macs = getter.secondary_macs().await?;
    output::emit(format, &macs, |macs| output::lines(macs))
}

pub async fn run_private_ips<G: EniInfoGetter>(
    getter: &G,
    args: PrivateIpsArgs,
    format: OutputFormat,
) -> Result<()> {
    if args.ipv6 {
        let ips = getter.private_ipv6s_by_mac(&args.mac).await?;
        output::emit(format, &ips, |ips| output::lines(ips))
    } else {
        let ips = getter.private_ipv4s_by_mac(&args.mac).await?;
        output::emit(format, &ips, |ips| output::lines(ips))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eniconf_resolver::{EniField, ResolveError};
    use eniconf_types::Eni;
    use std::net::{Ipv4Addr, Ipv6Addr};

    // Answers every call with a lookup failure
    struct FailingGetter;

    fn failure(field: EniField, mac: &str) -> ResolveError {
        ResolveError::Source {
            field,
            mac: mac.to_string(),
            source: eniconf_metadata::MetadataError::NotFound(mac.to_string()),
        }
    }

    #[async_trait]
    impl EniInfoGetter for FailingGetter {
        async fn eni_by_mac(&self, mac: &str) -> eniconf_resolver::Result<Eni> {
            Err(failure(EniField::Gateway, mac))
        }

        async fn eni_by_id(&self, id: &str) -> eniconf_resolver::Result<Eni> {
            Err(ResolveError::NotFound { id: id.to_string() })
        }

        async fn private_ipv4s_by_mac(&self, mac: &str) -> eniconf_resolver::Result<Vec<Ipv4Addr>> {
            Err(failure(EniField::PrivateIpv4s, mac))
        }

        async fn private_ipv6s_by_mac(&self, mac: &str) -> eniconf_resolver::Result<Vec<Ipv6Addr>> {
            Err(failure(EniField::PrivateIpv6s, mac))
        }

        async fn attached_enis(&self, _include_main: bool) -> eniconf_resolver::Result<Vec<Eni>> {
            Ok(Vec::new())
        }

        async fn secondary_macs(&self) -> eniconf_resolver::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_errors_surface_with_context() {
        let err = run_show(
            &FailingGetter,
            ShowArgs { mac: "m2".to_string() },
            OutputFormat::Json,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "failed to get eni gateway for mac m2");

        let err = run_find(
            &FailingGetter,
            FindArgs { id: "eni-999".to_string() },
            OutputFormat::Text,
        )
        .await
        .unwrap_err();
        assert!(err.downcast_ref::<ResolveError>().is_some_and(|e| e.is_not_found()));

        let err = run_private_ips(
            &FailingGetter,
            PrivateIpsArgs { mac: "m2".to_string(), ipv6: true },
            OutputFormat::Text,
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResolveError>().and_then(|e| e.field()),
            Some(EniField::PrivateIpv6s)
        );
    }

    #[tokio::test]
    async fn test_empty_listings_succeed() {
        run_list(&FailingGetter, ListArgs { include_main: false }, OutputFormat::Json)
            .await
            .unwrap();
        run_secondary_macs(&FailingGetter, OutputFormat::Text).await.unwrap();
    }
}
