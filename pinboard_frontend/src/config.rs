use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://img-gallery-back.onrender.com/api/images";
pub const RECENT_LIMIT: usize = 18;
pub const SWIPE_THRESHOLD: f32 = 50.0;
pub const TOAST_LIFETIME: Duration = Duration::from_millis(1500);
pub const MAX_CONCURRENT_DOWNLOADS: usize = 4;

#[derive(Debug, Clone)]
pub struct PinboardConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
    pub initial_location: Option<String>,
}

impl PinboardConfig {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("PINBOARD_API_URL")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let data_dir = env::var("PINBOARD_DATA_DIR")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let http_timeout = env::var("PINBOARD_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(15));
        Ok(Self {
            api_url: sanitize_endpoint(api_url)?,
            data_dir,
            http_timeout,
            initial_location: None,
        })
    }

    pub fn with_initial_location(mut self, location: Option<String>) -> Self {
        self.initial_location = location;
        self
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("pinboard"),
        None => PathBuf::from(".pinboard"),
    }
}

pub fn sanitize_endpoint(mut endpoint: String) -> Result<String> {
    endpoint = endpoint.trim().to_string();
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        endpoint = format!("http://{endpoint}");
    }
    while endpoint.ends_with('/') {
        endpoint.pop();
    }
    Url::parse(&endpoint).context("invalid catalog endpoint")?;
    Ok(endpoint)
}
