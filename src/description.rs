// Description update stage: load both description files and push them to
// the registry. Failures stay inside this stage and come back as an
// `UpdateOutcome`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::error;

use crate::api::HubClient;
use crate::config::Config;

/// PATCH body for the repository endpoint.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPayload {
    pub description: String,
    pub full_description: String,
}

impl DescriptionPayload {
    /// Read both files verbatim as UTF-8.
    pub fn load(short_file: &Path, full_file: &Path) -> Result<Self> {
        let description = std::fs::read_to_string(short_file).with_context(|| {
            format!("Failed to read short description file '{}'", short_file.display())
        })?;
        let full_description = std::fs::read_to_string(full_file).with_context(|| {
            format!("Failed to read full description file '{}'", full_file.display())
        })?;
        Ok(DescriptionPayload {
            description,
            full_description,
        })
    }
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Updated,
    Failed(anyhow::Error),
}

/// Load the configured description files and overwrite the repository's
/// descriptions with them.
pub fn update(client: &HubClient, config: &Config, token: &str, username: &str) -> UpdateOutcome {
    let result = DescriptionPayload::load(
        &config.short_description_file,
        &config.full_description_file,
    )
    .and_then(|payload| client.update_description(config, token, username, &payload));

    match result {
        Ok(()) => UpdateOutcome::Updated,
        Err(e) => {
            error!("Updating description texts failed: {:#}", e);
            UpdateOutcome::Failed(e)
        }
    }
}
