//! Action Policy
//!
//! Pure lookup from score to recommendation. Thresholds are checked
//! top-down and the first match wins.

use serde::{Deserialize, Serialize};

use super::rules::{EMERGENCY_MIN, HIGH_RISK_MIN, INTERVENTION_THRESHOLD, MODERATE_RISK_MIN};
use super::types::RiskScore;

/// Tiered recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRecommendation {
    LowRisk,
    ModerateRisk,
    HighRisk,
    EmergencyAlert,
}

impl ActionRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionRecommendation::LowRisk => "low_risk",
            ActionRecommendation::ModerateRisk => "moderate_risk",
            ActionRecommendation::HighRisk => "high_risk",
            ActionRecommendation::EmergencyAlert => "emergency_alert",
        }
    }

    /// User-facing recommendation text
    pub fn message(&self) -> &'static str {
        match self {
            ActionRecommendation::EmergencyAlert => {
                "Emergency alert: Contact local services or a trusted adult immediately."
            }
            ActionRecommendation::HighRisk => {
                "High risk: Reach out to a helpline or a mental health professional now."
            }
            ActionRecommendation::ModerateRisk => {
                "Moderate risk: Practice self-care and talk to someone you trust."
            }
            ActionRecommendation::LowRisk => "Low risk: Keep journaling and practicing mindfulness.",
        }
    }
}

impl std::fmt::Display for ActionRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Recommendation for a score
pub fn recommend(score: RiskScore) -> ActionRecommendation {
    let value = score.value();
    if value >= EMERGENCY_MIN {
        ActionRecommendation::EmergencyAlert
    } else if value >= HIGH_RISK_MIN {
        ActionRecommendation::HighRisk
    } else if value >= MODERATE_RISK_MIN {
        ActionRecommendation::ModerateRisk
    } else {
        ActionRecommendation::LowRisk
    }
}

/// Whether a score must raise the emergency overlay
pub fn requires_intervention(score: RiskScore) -> bool {
    score.value() >= INTERVENTION_THRESHOLD
}
