//! Ansible dynamic inventory from Infoblox NIOS host records
//!
//! Prints the full inventory document with `--list` (or no flags), or a
//! single host's variables with `--host <name>`.

use clap::Parser;
use color_eyre::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rollcall_cli::config::NiosConfig;
use rollcall_core::{HostFilter, HostLookup, InventoryBuilder};
use rollcall_source::nios::NiosSource;
use rollcall_source::traits::RecordSource;

#[derive(Parser)]
#[command(name = "rollcall-nios")]
#[command(about = "Serve NIOS host records as an Ansible dynamic inventory", long_about = None)]
struct Cli {
    /// Produce the full inventory document
    #[arg(long)]
    list: bool,

    /// Produce a single host's variable mapping
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
    let config = NiosConfig::load_default()?;

    // --list wins when both flags are given.
    let target = if cli.list { None } else { cli.host };
    let filter = match &target {
        Some(name) => HostFilter::Host(name.clone()),
        None => HostFilter::All,
    };

    let source = NiosSource::new(&config.provider, config.filters)?;
    let records = source.fetch(&filter).await?;

    let built = InventoryBuilder::new(config.builder).build(&records, &filter);
    if built.skipped > 0 {
        warn!(
            skipped = built.skipped,
            "records without a usable name were dropped"
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
