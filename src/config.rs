use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_PROJECT_ID: &str = "";
pub const DEFAULT_CREATED_BY: &str = "";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:5000";

/// Tshirt size code that unlocks free cpu/memory entry.
pub const CUSTOM_TSHIRT_SIZE: &str = "TX";
/// Weekdays at 06:30.
pub const DEFAULT_START_CRON: &str = "30 6 * * 1-5";
/// Weekdays at 14:30.
pub const DEFAULT_STOP_CRON: &str = "30 14 * * 1-5";
pub const DEFAULT_PLATFORM_TAG: &str = "vscode";
pub const MAX_WORKSPACE_NAME_LEN: usize = 26;

/// Settings the wizard and its HTTP collaborators need at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: String,
    pub project_id: String,
    pub created_by: String,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_api_base_url(),
            api_token: get_api_token(),
            project_id: get_project_id(),
            created_by: get_created_by(),
            request_timeout: get_request_timeout(),
        }
    }

    /// Names of required settings that are missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.project_id.trim().is_empty() {
            missing.push("PROJECT_ID");
        }
        if self.created_by.trim().is_empty() {
            missing.push("CREATED_BY");
        }
        missing
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_project_id() -> String {
    env::var("PROJECT_ID")
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string())
}

pub fn get_created_by() -> String {
    env::var("CREATED_BY")
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_CREATED_BY.to_string())
}

pub fn get_request_timeout() -> Duration {
    let secs = env::var("REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        FALLBACK_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
