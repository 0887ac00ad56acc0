// Credential loading: reads the registry login the docker CLI stored in
// its config file. Every failure is contained here and reported as a
// `CredentialLookup` variant, so a broken or missing config file never
// aborts the process.

use anyhow::{anyhow, Context, Result};
use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Username and password decoded from a docker config `auth` entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Decode a base64 `user:pass` string. The split happens on the first
    /// colon, so passwords may contain colons. Both halves must be
    /// non-empty.
    pub fn decode(auth: &str) -> Result<Self> {
        let raw = base64::engine::general_purpose::STANDARD
            .decode(auth.trim())
            .context("auth entry is not valid base64")?;
        let text = String::from_utf8(raw).context("decoded auth entry is not UTF-8")?;
        let (username, password) = text
            .split_once(':')
            .ok_or_else(|| anyhow!("decoded auth entry has no ':' separator"))?;
        if username.is_empty() || password.is_empty() {
            anyhow::bail!("decoded auth entry has an empty username or password");
        }
        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Result of looking for credentials.
#[derive(Debug)]
pub enum CredentialLookup {
    Found(Credentials),
    /// No config file: the tool was simply not set up on this machine.
    NotConfigured,
    /// The file exists but does not yield a usable username and password.
    Invalid(anyhow::Error),
}

#[derive(Deserialize)]
struct DockerConfig {
    auths: Option<HashMap<String, AuthEntry>>,
}

#[derive(Deserialize)]
struct AuthEntry {
    auth: Option<String>,
}

/// Location of the docker CLI config file, `~/.docker/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| config_path_in(&home))
}

fn config_path_in(home: &Path) -> PathBuf {
    home.join(".docker").join("config.json")
}

/// Read the credentials stored for `registry_host` in the config file at
/// `path`.
pub fn load(path: &Path, registry_host: &str) -> CredentialLookup {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No docker config file at '{}'", path.display());
            return CredentialLookup::NotConfigured;
        }
        Err(e) => {
            let e = anyhow::Error::new(e).context("Failed to read docker config file");
            error!("Could not read credentials from '{}': {:#}", path.display(), e);
            return CredentialLookup::Invalid(e);
        }
    };

    info!("Getting credentials from docker config file '{}'", path.display());
    match parse_credentials(&data, registry_host) {
        Ok(credentials) => CredentialLookup::Found(credentials),
        Err(e) => {
            error!("Could not read credentials from '{}': {:#}", path.display(), e);
            CredentialLookup::Invalid(e)
        }
    }
}

fn parse_credentials(data: &str, registry_host: &str) -> Result<Credentials> {
    let config: DockerConfig =
        serde_json::from_str(data).context("Parsing docker config json")?;
    let auth = config
        .auths
        .ok_or_else(|| anyhow!("docker config has no 'auths' section"))?
        .remove(registry_host)
        .ok_or_else(|| anyhow!("no 'auths' entry for '{}'", registry_host))?
        .auth
        .ok_or_else(|| anyhow!("'auths' entry for '{}' has no 'auth' field", registry_host))?;
    Credentials::decode(&auth)
}
