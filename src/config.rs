//! Runtime configuration read from the environment (and an optional `.env`).

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DATA_FILE_NAME: &str = "collections.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token. Absence is reported when a fetch is attempted.
    pub github_token: Option<String>,
    pub api_base_url: String,
    /// JSON file holding saved collections
    pub data_file: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("ignoring unreadable .env file: {}", e),
        }

        let github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let api_base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let data_file = std::env::var_os("GITCOMPARE_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);

        let request_timeout = std::env::var("GITCOMPARE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            github_token,
            api_base_url,
            data_file,
            request_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            data_file: default_data_file(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gitcompare"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FILE_NAME)
}
