// Shared fixtures for the integration tests.

use base64::Engine;
use hub_description_updater::config::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding a docker config file and the two
/// description files.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a docker config with a `docker.io` entry for `user_pass`.
    pub fn write_docker_config(&self, user_pass: &str) -> PathBuf {
        let auth = base64::engine::general_purpose::STANDARD.encode(user_pass);
        let contents = serde_json::json!({"auths": {"docker.io": {"auth": auth}}});
        let path = self.path("config.json");
        std::fs::write(&path, contents.to_string()).expect("Failed to write docker config");
        path
    }

    pub fn write_descriptions(&self, short: &str, full: &str) {
        std::fs::write(self.path("short.txt"), short).expect("Failed to write short description");
        std::fs::write(self.path("README.md"), full).expect("Failed to write full description");
    }

    pub fn config(&self, url_prefix: &str, docker_config: &Path) -> Config {
        Config {
            url_prefix: url_prefix.to_string(),
            login_path: "/users/login/".to_string(),
            image_name: "myimage".to_string(),
            short_description_file: self.path("short.txt"),
            full_description_file: self.path("README.md"),
            registry_host: "docker.io".to_string(),
            docker_config: Some(docker_config.to_path_buf()),
        }
    }
}

/// Run blocking client code off the async test runtime.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("Blocking task panicked")
}
