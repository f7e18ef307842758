//! Persistent CLI settings: the org connection registry

use crate::config::ConfigPaths;
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered org connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgConnection {
    /// Instance base URL, e.g. <https://mycompany.my.salesforce.com>
    pub instance_url: String,
    /// Access token used as a bearer token on query calls
    pub access_token: String,
}

/// CLI configuration stored as config.json in the config directory
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Alias used when --target-org is not passed
    #[serde(default)]
    pub default_org: Option<String>,
    /// Org connections keyed by alias
    #[serde(default)]
    pub orgs: BTreeMap<String, OrgConnection>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_org: None,
            orgs: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration, returning defaults when no config file exists yet
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        if !paths.config_file.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&paths.config_file)?;
        serde_json::from_str(&contents)
            .map_err(|e| CliError::Config(format!("Invalid config file: {}", e)))
    }

    /// Persist configuration to disk
    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.config_file, contents)?;

        // The file holds access tokens; keep it private to the owner.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(
                &paths.config_file,
                std::fs::Permissions::from_mode(0o600),
            )?;
        }

        Ok(())
    }

    /// Resolve the org to run against: explicit selector, else the default
    pub fn resolve_org(&self, selector: Option<&str>) -> CliResult<(&str, &OrgConnection)> {
        let alias = match selector.or(self.default_org.as_deref()) {
            Some(alias) => alias,
            None => return Err(CliError::NoTargetOrg),
        };

        match self.orgs.get_key_value(alias) {
            Some((alias, connection)) => Ok((alias.as_str(), connection)),
            None => Err(CliError::UnknownOrg(alias.to_string())),
        }
    }
}
