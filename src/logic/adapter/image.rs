//! Image classifier normalization
//!
//! Facial emotion from a (possibly nested) label list; overall sentiment
//! from the top general-purpose image label via keyword sets.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape::{top_entry, ResponseShape};
use crate::logic::risk::{FeatureBundle, Polarity};

/// Fallback when no facial emotion can be read
pub const DEFAULT_IMAGE_EMOTION: &str = "neutral";

// Substring match, so "sun" also hits "sunglass" and "war" hits "warplane".
static NEGATIVE_SCENE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)coffin|weapon|gun|blood|cemetery|funeral|accident|war|prison").expect("static pattern")
});
static POSITIVE_SCENE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)flower|smile|sun|beach|puppy|cat|family|friends|celebration").expect("static pattern")
});
static DISTRESS_FACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)sad|fear|angry").expect("static pattern"));

/// Normalized image signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSignals {
    pub emotion: String,
    pub sentiment: Polarity,
}

impl ImageSignals {
    pub fn from_responses(facial: &Value, labels: &Value) -> Self {
        Self {
            emotion: facial_emotion(facial),
            sentiment: scene_sentiment(labels),
        }
    }

    /// Image runs carry no text signals; polarity is explicitly neutral
    pub fn to_bundle(&self) -> FeatureBundle {
        FeatureBundle {
            polarity: Polarity::Neutral,
            toxicity: 0.0,
            self_harm_probability: 0.0,
            image_emotion_label: Some(self.emotion.clone()),
            image_sentiment: Some(self.sentiment),
            ..Default::default()
        }
    }

    /// Negative sentiment, or a sad/fearful/angry face
    pub fn has_depressive_indicators(&self) -> bool {
        self.sentiment == Polarity::Negative || DISTRESS_FACE.is_match(&self.emotion)
    }
}

/// Highest-scoring label across every nested list, or `"neutral"`
pub fn facial_emotion(response: &Value) -> String {
    let shape = ResponseShape::parse(response);
    match top_entry(shape.flattened()).and_then(|e| e.label.as_deref()) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => {
            log::debug!("Facial emotion response unusable, defaulting to neutral");
            DEFAULT_IMAGE_EMOTION.to_string()
        }
    }
}

/// Sentiment of the top image label
pub fn scene_sentiment(response: &Value) -> Polarity {
    let shape = ResponseShape::parse(response);
    let label = top_entry(shape.primary())
        .and_then(|e| e.label.as_deref())
        .unwrap_or_default();
    classify_label(label)
}

/// Negative keywords are checked before positive ones
pub fn classify_label(label: &str) -> Polarity {
    if NEGATIVE_SCENE.is_match(label) {
        Polarity::Negative
    } else if POSITIVE_SCENE.is_match(label) {
        Polarity::Positive
    } else {
        Polarity::Neutral
    }
}
