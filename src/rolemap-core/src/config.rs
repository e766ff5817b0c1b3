use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Cluster base URL, e.g. `https://localhost:9200`
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout applied by the HTTP client
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default)]
    pub ca_cert_path: String,

    /// Headers sent with every request (e.g. `Authorization`)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_user_agent() -> String {
    format!("rolemap/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(Error::Config("url is required".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "url must start with http:// or https://, got {:?}",
                self.url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            insecure_skip_verify: false,
            ca_cert_path: String::new(),
            headers: BTreeMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.url, "http://localhost:9200");
        assert!(config.timeout().is_none());
        assert!(!config.insecure_skip_verify);
        assert!(config.user_agent.starts_with("rolemap/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_json() {
        let raw = r#"{
            "url": "https://search.internal:9200",
            "timeout_secs": 15,
            "insecure_skip_verify": true,
            "headers": { "Authorization": "Basic YWRtaW46YWRtaW4=" }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert!(config.insecure_skip_verify);
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Basic YWRtaW46YWRtaW4=")
        );
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.url = String::new();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.url = "localhost:9200".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/rolemap.json").is_err());
    }
}
