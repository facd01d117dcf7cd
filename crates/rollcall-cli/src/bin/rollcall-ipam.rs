//! Ansible dynamic inventory from phpIPAM addresses
//!
//! Addresses flagged as managed land under the `all` group; a non-blank role
//! custom field additionally files the host into a child group. `--host
//! <name>` prints a single host's variables instead of the full document.

use clap::Parser;
use color_eyre::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rollcall_cli::config::IpamConfig;
use rollcall_core::{HostFilter, HostLookup, ManagedRoleBuilder};
use rollcall_source::ipam::IpamSource;
use rollcall_source::traits::RecordSource;

#[derive(Parser)]
#[command(name = "rollcall-ipam")]
#[command(about = "Serve phpIPAM addresses as an Ansible dynamic inventory", long_about = None)]
struct Cli {
    /// List all groups and hosts
    #[arg(long)]
    list: bool,

    /// Get all information about a specific host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Logs go to stderr; stdout carries nothing but the JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = IpamConfig::load_default()?;

    // --list wins when both flags are given.
    let target = if cli.list { None } else { cli.host };
    let filter = match &target {
        Some(name) => HostFilter::Host(name.clone()),
        None => HostFilter::All,
    };

    let source = IpamSource::new(&config.provider, config.query)?;
    let records = source.fetch(&filter).await?;

    let built = ManagedRoleBuilder::new(config.builder).build(&records, &filter);
    if built.skipped > 0 {
        warn!(
            skipped = built.skipped,
            "records without an address were dropped"
        );
    }

    match target {
        Some(name) => match built.document.lookup(&name) {
            Some(vars) => println!("{}", serde_json::to_string_pretty(vars)?),
            None => {
                eprintln!("no matching host found for {name}");
                std::process::exit(1);
            }
        },
        None => println!("{}", serde_json::to_string_pretty(&built.document)?),
    }

    Ok(())
}
