// ENI configuration from the instance metadata service
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::stderr;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

mod cmd;

use cmd::eni::{FindArgs, ListArgs, PrivateIpsArgs, ShowArgs};
use cmd::output::{self, OutputFormat};
use cmd::serve::ServeArgs;
use cmd::source::SourceArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve ENI configuration from instance metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Verbose output - shows more detailed logs
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the interface with the given MAC
    Show(ShowArgs),
    /// Find the attached interface with the given ENI ID
    Find(FindArgs),
    /// List attached interfaces
    List(ListArgs),
    /// List MACs of attached interfaces other than the primary one
    SecondaryMacs,
    /// List private addresses of an interface
    PrivateIps(PrivateIpsArgs),
    /// Show the instance identity
    Identity,
    /// Serve a metadata snapshot over HTTP
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose picks the level for our crates
    let level = if cli.verbose { "debug" } else { "info" };
    let default_directives = format!(
        "eniconf={level},eniconf_metadata={level},eniconf_resolver={level},hyper=warn,reqwest=warn,h2=warn,rustls=warn",
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    registry().with(filter).with(fmt::layer().with_writer(stderr)).init();
    debug!("Global logger initialized.");

    // Serving a snapshot needs no metadata source of its own
    if let Commands::Serve(args) = cli.command {
        return cmd::serve::run_serve(args).await;
    }

    let format = cli.output;
    let getter = cli.source.resolver().await?;
    match cli.command {
        Commands::Show(args) => cmd::eni::run_show(&getter, args, format).await?,
        Commands::Find(args) => cmd::eni::run_find(&getter, args, format).await?,
        Commands::List(args) => cmd::eni::run_list(&getter, args, format).await?,
        Commands::SecondaryMacs => cmd::eni::run_secondary_macs(&getter, format).await?,
        Commands::PrivateIps(args) => cmd::eni::run_private_ips(&getter, args, format).await?,
        Commands::Identity => output::emit(format, getter.identity(), output::identity_text)?,
        Commands::Serve(_) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "eniconf",
            "--snapshot",
            "snapshot.json",
            "--output",
            "json",
            "list",
            "--include-main",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::List(ListArgs { include_main: true })));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["eniconf", "serve", "--snapshot", "snapshot.json"]).unwrap();

        match cli.command {
            Commands::Serve(args) => assert_eq!(args.listen.to_string(), "127.0.0.1:8080"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
