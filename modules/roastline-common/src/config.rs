use std::env;

/// Bright Data dataset for LinkedIn people profiles.
const DEFAULT_DATASET_ID: &str = "gd_l1viktl72bvl7bjuj0";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // AI provider
    pub ai21_api_key: String,

    // Scraping
    pub brightdata_token: String,
    pub dataset_id: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            ai21_api_key: required_env("AI21_API_KEY"),
            brightdata_token: required_env("BRIGHT_DATA_TOKEN"),
            dataset_id: env::var("DATASET_ID")
                .unwrap_or_else(|_| DEFAULT_DATASET_ID.to_string()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
