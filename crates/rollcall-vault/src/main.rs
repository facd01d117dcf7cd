//! Ansible Vault client script backed by the rbw Bitwarden client
//!
//! Use with `ansible-vault --vault-id prod@rollcall-vault` to resolve the
//! credential `ansible-vault-prod` and print its password to stdout. The
//! vault ID replaces `{VAULT_ID}` in the credential template. When the rbw
//! store is locked, an unlock is attempted unless `RBW_TRY_UNLOCK` says
//! otherwise.

mod client;
mod error;
mod runner;

use clap::Parser;
use color_eyre::Result;

use crate::client::{RbwClient, resolve_credential};
use crate::runner::ProcessRunner;

#[derive(Parser)]
#[command(name = "rollcall-vault")]
#[command(about = "Resolve Ansible Vault credentials from the rbw client", long_about = None)]
struct Cli {
    /// Vault ID to look up; replaces {VAULT_ID} in the credential template
    #[arg(long)]
    vault_id: Option<String>,

    /// Credential name template to resolve with rbw
    #[arg(long)]
    credential: Option<String>,

    /// Folder to scope the lookup to
    #[arg(long)]
    folder: Option<String>,
}

/// Interpret a boolean-like toggle value.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "t" | "true" | "on" | "1"
    )
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name).map_or(default, |value| parse_flag(&value))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // The secret goes to stdout, everything else to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let vault_id = cli
        .vault_id
        .or_else(|| std::env::var("RBW_DEFAULT_VAULT_ID").ok())
        .unwrap_or_else(|| "default".to_string());
    let template = cli
        .credential
        .or_else(|| std::env::var("RBW_CREDENTIAL").ok())
        .unwrap_or_else(|| "ansible-vault-{VAULT_ID}".to_string());
    let folder = cli.folder.or_else(|| std::env::var("RBW_FOLDER").ok());
    let try_unlock = env_flag("RBW_TRY_UNLOCK", true);

    let client = RbwClient::new(ProcessRunner::new()).with_try_unlock(try_unlock);
    let credential = resolve_credential(&template, &vault_id);
    let secret = client.get(&credential, folder.as_deref()).await?;

    print!("{secret}");
    Ok(())
}
