//! Risk Scoring Rules & Thresholds
//!
//! Boost values, label sets and action tiers.
//! No scoring logic here - only constants.

// ============================================================================
// SCORE BOUNDS
// ============================================================================

/// Lowest possible risk score
pub const MIN_SCORE: u8 = 1;

/// Highest possible risk score
pub const MAX_SCORE: u8 = 10;

/// Every run starts from this raw value before boosts are added
pub const BASE_RAW_SCORE: u32 = 1;

// ============================================================================
// BOOSTS
// ============================================================================

/// Polarity boosts
pub const NEGATIVE_POLARITY_BOOST: u32 = 3;
pub const NEUTRAL_POLARITY_BOOST: u32 = 1;
pub const POSITIVE_POLARITY_BOOST: u32 = 0;

/// Probability boosts are `round(p * 10)`, capped here
pub const PROBABILITY_BOOST_CAP: u32 = 10;

/// Text emotion in [`DISTRESS_EMOTIONS`]
pub const EMOTION_BOOST: u32 = 3;

/// Facial emotion in [`DISTRESS_IMAGE_EMOTIONS`]
pub const IMAGE_EMOTION_BOOST: u32 = 3;

/// Negative image sentiment
pub const IMAGE_SENTIMENT_BOOST: u32 = 2;

// ============================================================================
// LABEL SETS
// ============================================================================

/// Text emotion labels that raise the score
pub const DISTRESS_EMOTIONS: [&str; 4] = ["sadness", "fear", "anger", "disgust"];

/// Facial emotion labels that raise the score (compared case-insensitively)
pub const DISTRESS_IMAGE_EMOTIONS: [&str; 3] = ["sad", "angry", "fear"];

/// Emotion labels mapped to positive polarity
pub const POSITIVE_EMOTIONS: [&str; 3] = ["joy", "love", "surprise"];

/// Emotion labels mapped to negative polarity
pub const NEGATIVE_EMOTIONS: [&str; 4] = ["sadness", "anger", "fear", "disgust"];

// ============================================================================
// ACTION TIERS (checked top-down, first match wins)
// ============================================================================

pub const EMERGENCY_MIN: u8 = 9;
pub const HIGH_RISK_MIN: u8 = 7;
pub const MODERATE_RISK_MIN: u8 = 5;

/// At or above this score the emergency overlay is shown
pub const INTERVENTION_THRESHOLD: u8 = HIGH_RISK_MIN;
