//! Configuration loading for the inventory binaries
//!
//! Each binary reads one TOML file, found via an environment variable
//! override, the working directory, `/etc/ansible/`, or the user config
//! directory. No usable config is a fatal setup failure: the process must
//! exit non-zero before any inventory JSON is emitted.

use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::Deserialize;

use rollcall_core::{BuilderConfig, ManagedRoleConfig};
use rollcall_source::ipam::{IpamProvider, IpamQuery};
use rollcall_source::nios::{NiosFilters, NiosProvider};

/// Configuration for the NIOS inventory binary
#[derive(Debug, Clone, Deserialize)]
pub struct NiosConfig {
    /// WAPI connection settings
    pub provider: NiosProvider,
    /// Server-side query filters
    #[serde(default)]
    pub filters: NiosFilters,
    /// Grouping and attribute-promotion policy
    #[serde(default)]
    pub builder: BuilderConfig,
}

impl NiosConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .wrap_err_with(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `ROLLCALL_NIOS_CONFIG` or the first existing default path
    ///
    /// # Errors
    /// Returns an error if no config file can be found or loaded
    pub fn load_default() -> eyre::Result<Self> {
        load_first("ROLLCALL_NIOS_CONFIG", "rollcall-nios.toml", Self::load)
    }
}

/// Configuration for the phpIPAM inventory binary
#[derive(Debug, Clone, Deserialize)]
pub struct IpamConfig {
    /// API connection settings
    pub provider: IpamProvider,
    /// Server-side custom-field filter
    #[serde(default)]
    pub query: IpamQuery,
    /// Managed/role classification policy
    #[serde(default)]
    pub builder: ManagedRoleConfig,
}

impl IpamConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .wrap_err_with(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `ROLLCALL_IPAM_CONFIG` or the first existing default path
    ///
    /// # Errors
    /// Returns an error if no config file can be found or loaded
    pub fn load_default() -> eyre::Result<Self> {
        load_first("ROLLCALL_IPAM_CONFIG", "rollcall-ipam.toml", Self::load)
    }
}

fn candidate_paths(file_name: &str) -> Vec<PathBuf> {
    vec![
        PathBuf::from(file_name),
        PathBuf::from("/etc/ansible").join(file_name),
        dirs::config_dir()
            .map(|p| p.join("rollcall").join(file_name))
            .unwrap_or_default(),
    ]
}

fn load_first<T>(
    env_var: &str,
    file_name: &str,
    load: impl Fn(&Path) -> eyre::Result<T>,
) -> eyre::Result<T> {
    if let Ok(path) = std::env::var(env_var) {
        return load(Path::new(&path));
    }

    for path in candidate_paths(file_name) {
        if path.exists() {
            return load(&path);
        }
    }

    Err(eyre::eyre!("unable to locate a {file_name} config file"))
}
