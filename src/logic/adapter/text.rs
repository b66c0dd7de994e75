//! Text classifier normalization
//!
//! Emotion, toxicity and the self-harm proxy. Every extractor degrades to
//! its neutral/zero default on an unexpected shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape::{find_score, top_entry, unit_interval, ResponseShape};
use crate::logic::risk::{FeatureBundle, Polarity};

/// Fallback when no emotion label can be read
pub const DEFAULT_EMOTION: &str = "neutral";

static HATE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)hate").expect("static pattern"));
static OFFENSIVE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)offensive|abusive|toxic").expect("static pattern"));
static TOXIC_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)toxic").expect("static pattern"));

/// Normalized text signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    /// Top emotion label as returned by the provider
    pub emotion: String,
    pub polarity: Polarity,
    pub toxicity: f64,
    /// Proxy only: read from a generic toxicity classifier
    pub self_harm_probability: f64,
}

impl TextSignals {
    pub fn from_responses(emotion: &Value, toxicity: &Value, self_harm: &Value) -> Self {
        let emotion = top_emotion(emotion);
        let polarity = Polarity::from_emotion(&emotion);
        Self {
            emotion,
            polarity,
            toxicity: toxicity_score(toxicity),
            self_harm_probability: self_harm_proxy(self_harm),
        }
    }

    pub fn to_bundle(&self) -> FeatureBundle {
        FeatureBundle {
            emotion_label: Some(self.emotion.to_lowercase()),
            polarity: self.polarity,
            toxicity: self.toxicity,
            self_harm_probability: self.self_harm_probability,
            ..Default::default()
        }
    }
}

/// Highest-scoring emotion label, or `"neutral"`
pub fn top_emotion(response: &Value) -> String {
    let shape = ResponseShape::parse(response);
    match top_entry(shape.primary()).and_then(|e| e.label.as_deref()) {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => {
            log::debug!("Emotion response unusable ({:?}), defaulting to neutral", shape);
            DEFAULT_EMOTION.to_string()
        }
    }
}

/// `max(hate, offensive|abusive|toxic)`; first matching label of each kind, 0 if absent
pub fn toxicity_score(response: &Value) -> f64 {
    let shape = ResponseShape::parse(response);
    let entries = shape.primary();
    let hate = find_score(entries, &HATE_LABEL).unwrap_or(0.0);
    let offensive = find_score(entries, &OFFENSIVE_LABEL).unwrap_or(0.0);
    unit_interval(hate.max(offensive))
}

/// Score of the first label containing "toxic", 0 if absent.
///
/// This reuses a generic toxicity classifier as a stand-in for self-harm
/// risk. It is a labeled approximation, not a self-harm detector.
pub fn self_harm_proxy(response: &Value) -> f64 {
    let shape = ResponseShape::parse(response);
    unit_interval(find_score(shape.primary(), &TOXIC_LABEL).unwrap_or(0.0))
}
