//! Risk Types
//!
//! Core types for risk scoring.
//! No logic - only data structures.

use serde::{Deserialize, Serialize};

use super::rules::{MAX_SCORE, MIN_SCORE, NEGATIVE_EMOTIONS, POSITIVE_EMOTIONS};

// ============================================================================
// POLARITY
// ============================================================================

/// Sentiment polarity, used for both text polarity and image sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    /// Absent polarity is treated as neutral
    #[default]
    Neutral,
    Negative,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Neutral => "neutral",
            Polarity::Negative => "negative",
        }
    }

    /// Map a top emotion label onto a polarity
    pub fn from_emotion(label: &str) -> Self {
        let label = label.to_lowercase();
        if POSITIVE_EMOTIONS.contains(&label.as_str()) {
            Polarity::Positive
        } else if NEGATIVE_EMOTIONS.contains(&label.as_str()) {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FEATURE BUNDLE (from Classifier Adapter)
// ============================================================================

/// Normalized signal set consumed by the aggregator
///
/// Every field may be left at its default; defaults contribute no boost
/// except `polarity`, whose neutral default contributes the neutral boost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureBundle {
    /// Top text emotion (lowercase taxonomy token)
    pub emotion_label: Option<String>,
    pub polarity: Polarity,
    /// Probability in [0, 1]; clamped before use
    pub toxicity: f64,
    /// Proxy probability in [0, 1]; clamped before use.
    /// Sourced from a generic toxicity classifier, not a self-harm model.
    pub self_harm_probability: f64,
    pub image_emotion_label: Option<String>,
    pub image_sentiment: Option<Polarity>,
}

// ============================================================================
// RISK SCORE
// ============================================================================

/// Integer risk score in `[1, 10]`
///
/// Produced by the aggregator. The only other way in is validated
/// conversion from a persisted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    /// Clamp a halved raw score into range
    pub(crate) fn clamped(value: u32) -> Self {
        Self(value.clamp(MIN_SCORE as u32, MAX_SCORE as u32) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("risk score {} outside {}..={}", value, MIN_SCORE, MAX_SCORE))
        }
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.0, MAX_SCORE)
    }
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

/// How the final score was built, boost by boost
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub polarity_boost: u32,
    pub toxicity_boost: u32,
    pub self_harm_boost: u32,
    pub emotion_boost: u32,
    pub image_emotion_boost: u32,
    pub image_sentiment_boost: u32,
    /// 1 + all boosts, before halving
    pub raw_score: u32,
}

/// Aggregator output with its breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub breakdown: ScoreBreakdown,
}
