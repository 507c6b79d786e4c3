//! Layered configuration.
//!
//! Sources are merged with this precedence, highest first: CLI flags,
//! environment variables, a `.osfcli.json` in the working directory, the
//! user configuration file, built-in defaults. The password is only ever
//! taken from the environment, never stored in a file.

use crate::http::Credentials;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.osf.io/v2/";
pub const LOCAL_CONFIG_FILE: &str = ".osfcli.json";

pub const ENV_USERNAME: &str = "OSF_USERNAME";
pub const ENV_PASSWORD: &str = "OSF_PASSWORD";
pub const ENV_PROJECT: &str = "OSF_PROJECT";
pub const ENV_BASE_URL: &str = "OSF_API_URL";

/// On-disk configuration file contents. All fields optional; absent
/// fields leave the lower-precedence value in place.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub username: Option<String>,
    pub project: Option<String>,
    pub base_url: Option<String>,
}

/// Effective configuration after merging all sources.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: Option<String>,
    pub password: Option<String>,
    pub project: Option<String>,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            project: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl Config {
    /// Merge all sources. The CLI flags win over everything else.
    pub fn load(cli_username: Option<String>, cli_project: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = user_config_path() {
            config.apply_file(&path);
        }
        config.apply_file(Path::new(LOCAL_CONFIG_FILE));
        config.apply_env();
        if cli_username.is_some() {
            config.username = cli_username;
        }
        if cli_project.is_some() {
            config.project = cli_project;
        }
        config
    }

    /// Basic-auth credentials, present only when both username and
    /// password are known.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    fn apply_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!("could not read config file {}: {}", path.display(), error);
                return;
            }
        };
        match serde_json::from_str::<ConfigFile>(&contents) {
            Ok(file) => self.apply_file_values(file),
            Err(error) => {
                warn!("ignoring malformed config file {}: {}", path.display(), error);
            }
        }
    }

    fn apply_file_values(&mut self, file: ConfigFile) {
        if file.username.is_some() {
            self.username = file.username;
        }
        if file.project.is_some() {
            self.project = file.project;
        }
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(username) = env::var(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Ok(password) = env::var(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Ok(project) = env::var(ENV_PROJECT) {
            self.project = Some(project);
        }
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            self.base_url = base_url;
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("osfcli").join("config.json"))
}
