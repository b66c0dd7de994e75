//! Emergency Module
//!
//! Intervention overlay raised on high-risk scores, plus its static content.

pub mod content;
pub mod notifier;

pub use content::{random_quote, BreathingPattern, Helpline, HELPLINES, QUOTES};
pub use notifier::{
    EmergencyAction, EmergencyNotifier, EmergencyOverlay, EmergencyResponse, OverlayStatus,
};
