//! Risk Aggregator
//!
//! Only scoring logic - no types, no policy.
//! Input: FeatureBundle
//! Output: RiskScore (1-10)
//!
//! The arithmetic is a compatibility contract: integer boosts, the max (not
//! the sum) of toxicity and self-harm, then halving with half-up rounding.
//! Scores must stay identical for identical inputs.

use super::rules::{
    BASE_RAW_SCORE, DISTRESS_EMOTIONS, DISTRESS_IMAGE_EMOTIONS, EMOTION_BOOST,
    IMAGE_EMOTION_BOOST, IMAGE_SENTIMENT_BOOST, NEGATIVE_POLARITY_BOOST,
    NEUTRAL_POLARITY_BOOST, POSITIVE_POLARITY_BOOST, PROBABILITY_BOOST_CAP,
};
use super::types::{FeatureBundle, Polarity, RiskAssessment, RiskScore, ScoreBreakdown};

// ============================================================================
// MAIN AGGREGATION FUNCTION
// ============================================================================

/// Map a feature bundle onto a 1-10 risk score
pub fn aggregate(bundle: &FeatureBundle) -> RiskScore {
    aggregate_with_breakdown(bundle).score
}

/// Aggregation that also reports every boost
pub fn aggregate_with_breakdown(bundle: &FeatureBundle) -> RiskAssessment {
    let polarity_boost = match bundle.polarity {
        Polarity::Negative => NEGATIVE_POLARITY_BOOST,
        Polarity::Neutral => NEUTRAL_POLARITY_BOOST,
        Polarity::Positive => POSITIVE_POLARITY_BOOST,
    };

    let toxicity_boost = probability_boost(bundle.toxicity);
    let self_harm_boost = probability_boost(bundle.self_harm_probability);

    let emotion_boost = match bundle.emotion_label.as_deref() {
        // Exact match on the lowercase taxonomy token
        Some(label) if DISTRESS_EMOTIONS.contains(&label) => EMOTION_BOOST,
        _ => 0,
    };

    let image_emotion_boost = match bundle.image_emotion_label.as_deref() {
        Some(label) if DISTRESS_IMAGE_EMOTIONS.iter().any(|e| label.eq_ignore_ascii_case(e)) => {
            IMAGE_EMOTION_BOOST
        }
        _ => 0,
    };

    let image_sentiment_boost = match bundle.image_sentiment {
        Some(Polarity::Negative) => IMAGE_SENTIMENT_BOOST,
        _ => 0,
    };

    let raw_score = BASE_RAW_SCORE
        + polarity_boost
        + toxicity_boost.max(self_harm_boost)
        + emotion_boost
        + image_emotion_boost
        + image_sentiment_boost;

    // round(raw / 2) with halves rounding up; raw is a non-negative integer
    let halved = (raw_score + 1) / 2;

    RiskAssessment {
        score: RiskScore::clamped(halved),
        breakdown: ScoreBreakdown {
            polarity_boost,
            toxicity_boost,
            self_harm_boost,
            emotion_boost,
            image_emotion_boost,
            image_sentiment_boost,
            raw_score,
        },
    }
}

/// `round(clamp(p, 0, 1) * 10)`, capped. NaN counts as 0; infinities clamp.
fn probability_boost(probability: f64) -> u32 {
    let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
    ((p * 10.0).round() as u32).min(PROBABILITY_BOOST_CAP)
}

// ============================================================================
// TESTS
// ============================================================================
