//! Workflow types: reports and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::inference::InferenceError;
use crate::logic::risk::{ActionRecommendation, Polarity, RiskScore, ScoreBreakdown};

/// Fixed explanation attached to text reports
pub const TEXT_EXPLANATION: &str = "The score combines emotion polarity, detected toxicity, \
and self-harm indicators using a weighted heuristic. Higher toxic/self-harm probabilities raise the score.";

/// Hint appended to auth failures
pub const AUTH_HINT: &str =
    "If this is an auth error, set your HuggingFace token (NEUROSHIELD_HF_TOKEN or `neuroshield token set`).";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    #[error("nothing to analyze: {0}")]
    EmptyInput(&'static str),

    #[error("an analysis is already running")]
    Busy,

    #[error("analysis cancelled")]
    Cancelled,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl WorkflowError {
    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::EmptyInput(what) => format!("Please provide {}.", what),
            WorkflowError::Busy => "An analysis is already in progress.".to_string(),
            WorkflowError::Cancelled => "Analysis cancelled.".to_string(),
            WorkflowError::Inference(e) if e.is_auth_error() => {
                format!("Failed to analyze. {} {}", e, AUTH_HINT)
            }
            WorkflowError::Inference(e) => format!("Failed to analyze. {}", e),
        }
    }
}

// ============================================================================
// REPORTS
// ============================================================================

/// Text workflow result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub run_id: String,
    /// Epoch millis
    pub timestamp: i64,
    pub emotion: String,
    pub polarity: Polarity,
    pub toxicity: f64,
    /// Proxy signal from a generic toxicity classifier
    pub self_harm_probability: f64,
    pub score: RiskScore,
    pub recommendation: ActionRecommendation,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
    pub intervention_triggered: bool,
}

impl TextAnalysis {
    /// "42.0%"
    pub fn toxicity_percent(&self) -> String {
        format!("{:.1}%", self.toxicity * 100.0)
    }

    pub fn self_harm_percent(&self) -> String {
        format!("{:.1}%", self.self_harm_probability * 100.0)
    }
}

/// Image workflow result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub run_id: String,
    pub timestamp: i64,
    pub facial_emotion: String,
    pub sentiment: Polarity,
    pub depressive_indicators: bool,
    pub score: RiskScore,
    pub recommendation: ActionRecommendation,
    pub breakdown: ScoreBreakdown,
    pub intervention_triggered: bool,
}

impl ImageAnalysis {
    /// "Present" / "Low"
    pub fn depressive_indicators_label(&self) -> &'static str {
        if self.depressive_indicators {
            "Present"
        } else {
            "Low"
        }
    }
}
