// Registry API client: a small blocking HTTP client for the two calls the
// updater makes, the login POST and the repository PATCH.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::description::DescriptionPayload;

/// The registry expects this scheme instead of `Bearer`.
const TOKEN_PREFIX: &str = "JWT ";

/// Blocking HTTP client shared by the login and update stages.
#[derive(Clone)]
pub struct HubClient {
    client: Client,
}

/// Login request payload.
#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response. Only `token` is read; anything else the registry
/// returns is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl HubClient {
    /// Build a client with reqwest's default settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HubClient { client })
    }

    /// POST the credentials to the login endpoint and return the token
    /// field of the response, if any.
    pub fn login(&self, config: &Config, credentials: &Credentials) -> Result<Option<String>> {
        let url = config.login_url();
        info!(
            "Getting login token for username '{}' and login url '{}'",
            credentials.username, url
        );

        let req = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let res = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .context("Failed to send login request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Login failed: {} - {}", status, txt);
        }
        let resp: LoginResponse = res.json().context("Parsing login response json")?;
        Ok(resp.token)
    }

    /// PATCH both description texts onto `username`'s repository. The
    /// response body is discarded.
    pub fn update_description(
        &self,
        config: &Config,
        token: &str,
        username: &str,
        payload: &DescriptionPayload,
    ) -> Result<()> {
        let url = config.repository_url(username);
        info!("Updating description texts for image url '{}'", url);

        let auth = HeaderValue::from_str(&format!("{}{}", TOKEN_PREFIX, token))
            .context("Login token is not a valid header value")?;
        let res = self
            .client
            .patch(&url)
            .header(AUTHORIZATION, auth)
            .json(payload)
            .send()
            .context("Failed to send description update request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Description update failed: {} - {}", status, txt);
        }
        Ok(())
    }
}
