//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point the app at another inference host, only edit this file
//! (or set the matching environment variable).

/// Default inference base URL
///
/// Each classifier is addressed as `<base>/<model-id>`.
/// For a local mock: http://localhost:8080
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Data directory name under the platform data-local dir
pub const DATA_DIR_NAME: &str = "neuroshield";

/// Persistent store file name
pub const STORE_FILE_NAME: &str = "store.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "NeuroShield";

// ============================================
// Classifier models
// ============================================

/// Text emotion classifier
pub const MODEL_TEXT_EMOTION: &str = "bhadresh-savani/distilbert-base-uncased-emotion";

/// Hate / offensive speech classifier
pub const MODEL_TOXICITY: &str = "Hate-speech-CNERG/bert-base-uncased-hatexplain";

/// Generic toxicity classifier, reused as a self-harm proxy signal
pub const MODEL_SELF_HARM_PROXY: &str = "s-nlp/roberta_toxicity_classifier";

/// Facial emotion classifier
pub const MODEL_FACIAL_EMOTION: &str = "dima806/facial_emotions_image_detection";

/// General image-label classifier
pub const MODEL_IMAGE_LABELS: &str = "microsoft/resnet-50";

// ============================================
// Persistent store keys
// ============================================

/// Score history (JSON array, newest first)
pub const KEY_SCORE_HISTORY: &str = "neuro_scores";

/// Optional inference bearer credential
pub const KEY_HF_TOKEN: &str = "hf_token";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get inference base URL from environment or use default
pub fn get_inference_base_url() -> String {
    std::env::var("NEUROSHIELD_INFERENCE_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string())
}

/// Get bearer credential from environment, if any
pub fn get_env_token() -> Option<String> {
    std::env::var("NEUROSHIELD_HF_TOKEN")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get request timeout from environment or use default
pub fn get_request_timeout_secs() -> u64 {
    std::env::var("NEUROSHIELD_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs: &u64| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Get data directory from environment or use the platform default
pub fn get_data_dir() -> std::path::PathBuf {
    std::env::var("NEUROSHIELD_DATA_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(DATA_DIR_NAME)
        })
}
