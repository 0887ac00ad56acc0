// Orchestration: credentials -> login -> description update. Each stage
// returns an outcome value and the next stage only runs on success.

use tracing::{error, info};

use crate::api::HubClient;
use crate::config::Config;
use crate::credentials::{self, CredentialLookup, Credentials};
use crate::description::{self, UpdateOutcome};

/// Opaque bearer token returned by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(SessionToken),
    Failed(anyhow::Error),
}

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Updated,
    NoCredentials,
    AuthenticationFailed,
    UpdateFailed,
    /// The HTTP client could not be constructed (e.g. TLS backend setup).
    ClientUnavailable,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Log in and turn every kind of failure (transport, HTTP status, bad
/// body, empty or absent token) into `AuthOutcome::Failed`.
pub fn authenticate(client: &HubClient, config: &Config, credentials: &Credentials) -> AuthOutcome {
    let outcome = match client.login(config, credentials) {
        Ok(Some(token)) if !token.is_empty() => AuthOutcome::Authenticated(SessionToken(token)),
        Ok(_) => AuthOutcome::Failed(anyhow::anyhow!("login response contained no token")),
        Err(e) => AuthOutcome::Failed(e),
    };
    if let AuthOutcome::Failed(e) = &outcome {
        error!("Authentication failed: {:#}", e);
    }
    outcome
}

/// Run the whole update once with an already built client.
pub fn run_with_client(client: &HubClient, config: &Config) -> RunOutcome {
    let lookup = match &config.docker_config {
        Some(path) => credentials::load(path, &config.registry_host),
        None => match credentials::default_config_path() {
            Some(path) => credentials::load(&path, &config.registry_host),
            None => {
                info!("Could not determine the home directory, no docker config to read");
                CredentialLookup::NotConfigured
            }
        },
    };
    let credentials = match lookup {
        CredentialLookup::Found(credentials) => credentials,
        CredentialLookup::NotConfigured | CredentialLookup::Invalid(_) => {
            info!("No registry credentials available, skipping description update");
            return RunOutcome::NoCredentials;
        }
    };

    let token = match authenticate(client, config, &credentials) {
        AuthOutcome::Authenticated(token) => token,
        AuthOutcome::Failed(_) => return RunOutcome::AuthenticationFailed,
    };

    match description::update(client, config, token.as_str(), &credentials.username) {
        UpdateOutcome::Updated => {
            info!("Description texts updated");
            RunOutcome::Updated
        }
        UpdateOutcome::Failed(_) => RunOutcome::UpdateFailed,
    }
}

/// Entry point used by the binary.
pub fn run(config: &Config) -> RunOutcome {
    match HubClient::new() {
        Ok(client) => run_with_client(&client, config),
        Err(e) => {
            error!("{:#}", e);
            RunOutcome::ClientUnavailable
        }
    }
}
