//! Inference Module
//!
//! Remote classifier calls. The workflow only sees the `InferenceBackend`
//! trait; `InferenceClient` is the HTTP implementation.

pub mod client;

pub use client::{
    InferenceBackend, InferenceClient, InferenceConfig, InferenceError, Payload,
    DEFAULT_IMAGE_CONTENT_TYPE,
};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Model ids, one per classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEndpoints {
    pub text_emotion: String,
    pub toxicity: String,
    pub self_harm_proxy: String,
    pub facial_emotion: String,
    pub image_labels: String,
}

impl Default for ModelEndpoints {
    fn default() -> Self {
        Self {
            text_emotion: constants::MODEL_TEXT_EMOTION.to_string(),
            toxicity: constants::MODEL_TOXICITY.to_string(),
            self_harm_proxy: constants::MODEL_SELF_HARM_PROXY.to_string(),
            facial_emotion: constants::MODEL_FACIAL_EMOTION.to_string(),
            image_labels: constants::MODEL_IMAGE_LABELS.to_string(),
        }
    }
}
