// Run configuration: parsed once at startup from command line flags (or
// the matching environment variables) and then passed by reference into
// every stage of the pipeline. Nothing reads configuration globally.

use clap::Parser;
use std::path::PathBuf;

/// Registry key looked up under `auths` in the docker config file.
pub const DEFAULT_REGISTRY_HOST: &str = "docker.io";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Update a registry image's short and full description", long_about = None)]
pub struct Config {
    /// Base URL of the registry web API, e.g. https://hub.docker.com/v2
    #[clap(long, env = "URL_PREFIX")]
    pub url_prefix: String,

    /// Path appended to the URL prefix for the login request
    #[clap(long, env = "LOGIN_PATH")]
    pub login_path: String,

    /// Repository name under the logged in user's namespace
    #[clap(long, env = "IMAGE_NAME")]
    pub image_name: String,

    /// File holding the short description text
    #[clap(long, env = "SHORT_DESCRIPTION_FILE")]
    pub short_description_file: PathBuf,

    /// File holding the full description text
    #[clap(long, env = "FULL_DESCRIPTION_FILE")]
    pub full_description_file: PathBuf,

    /// Host entry to read from the docker config `auths` section
    #[clap(long, env = "REGISTRY_HOST", default_value = DEFAULT_REGISTRY_HOST)]
    pub registry_host: String,

    /// Explicit docker config file, instead of ~/.docker/config.json
    #[clap(long, env = "DOCKER_CONFIG_FILE")]
    pub docker_config: Option<PathBuf>,
}

impl Config {
    /// Login endpoint: the prefix and login path are joined verbatim.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.url_prefix, self.login_path)
    }

    /// Repository endpoint for `username`'s copy of the configured image.
    pub fn repository_url(&self, username: &str) -> String {
        format!(
            "{}/repositories/{}/{}/",
            self.url_prefix, username, self.image_name
        )
    }
}
