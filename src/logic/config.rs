//! Configuration module

use std::path::PathBuf;

use crate::constants;
use crate::logic::inference::InferenceConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Classifier base URL, `<base>/<model-id>`
    pub inference_base_url: String,

    /// Bearer credential from the environment (the store is consulted later)
    pub env_token: Option<String>,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Where `store.json` lives
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            inference_base_url: constants::get_inference_base_url(),
            env_token: constants::get_env_token(),
            request_timeout_secs: constants::get_request_timeout_secs(),
            data_dir: constants::get_data_dir(),
        }
    }

    /// Client settings with the resolved credential
    pub fn inference_config(&self, token: Option<String>) -> InferenceConfig {
        InferenceConfig {
            base_url: self.inference_base_url.clone(),
            token,
            timeout_seconds: self.request_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_config_carries_settings() {
        let config = AppConfig {
            inference_base_url: "http://localhost:8080".to_string(),
            env_token: None,
            request_timeout_secs: 12,
            data_dir: PathBuf::from("/tmp/neuroshield"),
        };

        let inference = config.inference_config(Some("hf_x".to_string()));
        assert_eq!(inference.base_url, "http://localhost:8080");
        assert_eq!(inference.timeout_seconds, 12);
        assert_eq!(inference.token.as_deref(), Some("hf_x"));
    }
}
