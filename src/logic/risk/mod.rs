//! Risk Module
//!
//! Turns classifier signals into a bounded 1-10 score and a tiered action.
//! This is the only place with decision logic; everything around it is I/O.
//!
//! ## Structure
//! - `types`: Core types (FeatureBundle, Polarity, RiskScore, ScoreBreakdown)
//! - `rules`: Boosts, label sets and tier thresholds
//! - `aggregator`: Scoring logic
//! - `policy`: Score -> recommendation
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{aggregate, recommend, FeatureBundle, Polarity};
//!
//! let score = aggregate(&FeatureBundle { polarity: Polarity::Negative, ..Default::default() });
//! println!("{} -> {}", score, recommend(score));
//! ```

pub mod types;
pub mod rules;
pub mod aggregator;
pub mod policy;

pub use types::{FeatureBundle, Polarity, RiskAssessment, RiskScore, ScoreBreakdown};

pub use rules::INTERVENTION_THRESHOLD;

pub use aggregator::{aggregate, aggregate_with_breakdown};

pub use policy::{recommend, requires_intervention, ActionRecommendation};
