//! Emergency Notifier
//!
//! Fire-and-forget signal raised by the workflow when a score crosses the
//! intervention threshold. The overlay is an explicit object owned by the
//! host, not a global.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use super::content::{self, BreathingPattern, Helpline, HELPLINES};
use crate::logic::risk::RiskScore;

/// Notifier collaborator. `show` must not block the workflow.
pub trait EmergencyNotifier: Send + Sync {
    fn show(&self, score: RiskScore);
}

/// What the user picked on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyAction {
    Motivation,
    Breathing,
    Helpline,
    Dismiss,
}

impl std::str::FromStr for EmergencyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "motivation" | "quote" => Ok(EmergencyAction::Motivation),
            "breathing" | "breathe" => Ok(EmergencyAction::Breathing),
            "helpline" => Ok(EmergencyAction::Helpline),
            "dismiss" | "close" => Ok(EmergencyAction::Dismiss),
            other => Err(format!("Unknown emergency action: {}", other)),
        }
    }
}

/// Result of an overlay action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmergencyResponse {
    Motivation { quote: String },
    Breathing { pattern: BreathingPattern, instructions: String },
    Helpline { message: String, helplines: Vec<Helpline> },
    Dismissed,
}

/// Overlay state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayStatus {
    pub visible: bool,
    pub headline: &'static str,
    pub advice: &'static str,
    /// Score that last raised the overlay (0 = never)
    pub last_score: u8,
}

/// Emergency overlay
#[derive(Debug, Default)]
pub struct EmergencyOverlay {
    visible: AtomicBool,
    last_score: AtomicU8,
}

impl EmergencyOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> OverlayStatus {
        OverlayStatus {
            visible: self.is_visible(),
            headline: content::HEADLINE,
            advice: content::ADVICE,
            last_score: self.last_score.load(Ordering::SeqCst),
        }
    }

    pub fn dismiss(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            log::info!("Emergency overlay dismissed");
        }
    }

    /// Motivation, breathing and helpline leave the overlay up
    pub fn handle(&self, action: EmergencyAction) -> EmergencyResponse {
        match action {
            EmergencyAction::Motivation => EmergencyResponse::Motivation {
                quote: content::random_quote().to_string(),
            },
            EmergencyAction::Breathing => {
                let pattern = BreathingPattern::standard();
                EmergencyResponse::Breathing {
                    pattern,
                    instructions: pattern.instructions(),
                }
            }
            EmergencyAction::Helpline => EmergencyResponse::Helpline {
                message: content::helpline_message(),
                helplines: HELPLINES.to_vec(),
            },
            EmergencyAction::Dismiss => {
                self.dismiss();
                EmergencyResponse::Dismissed
            }
        }
    }
}

impl EmergencyNotifier for EmergencyOverlay {
    fn show(&self, score: RiskScore) {
        self.last_score.store(score.value(), Ordering::SeqCst);
        if !self.visible.swap(true, Ordering::SeqCst) {
            log::warn!("Emergency overlay raised (score {})", score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: u8) -> RiskScore {
        RiskScore::try_from(v).unwrap()
    }

    #[test]
    fn test_show_and_dismiss() {
        let overlay = EmergencyOverlay::new();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.status().last_score, 0);

        overlay.show(score(8));
        assert!(overlay.is_visible());
        assert_eq!(overlay.status().last_score, 8);
        assert_eq!(overlay.status().headline, content::HEADLINE);

        // showing twice is idempotent
        overlay.show(score(9));
        assert!(overlay.is_visible());
        assert_eq!(overlay.status().last_score, 9);

        assert_eq!(overlay.handle(EmergencyAction::Dismiss), EmergencyResponse::Dismissed);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_content_actions_keep_overlay_visible() {
        let overlay = EmergencyOverlay::new();
        overlay.show(score(7));

        match overlay.handle(EmergencyAction::Motivation) {
            EmergencyResponse::Motivation { quote } => assert!(content::QUOTES.contains(&quote.as_str())),
            other => panic!("unexpected response: {:?}", other),
        }
        match overlay.handle(EmergencyAction::Breathing) {
            EmergencyResponse::Breathing { pattern, .. } => {
                assert_eq!((pattern.inhale_secs, pattern.hold_secs, pattern.exhale_secs), (4, 2, 6))
            }
            other => panic!("unexpected response: {:?}", other),
        }
        match overlay.handle(EmergencyAction::Helpline) {
            EmergencyResponse::Helpline { helplines, message } => {
                assert_eq!(helplines.len(), 3);
                assert!(message.contains("988"));
            }
            other => panic!("unexpected response: {:?}", other),
        }

        assert!(overlay.is_visible());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("Breathing".parse::<EmergencyAction>(), Ok(EmergencyAction::Breathing));
        assert_eq!("close".parse::<EmergencyAction>(), Ok(EmergencyAction::Dismiss));
        assert!("call-mom".parse::<EmergencyAction>().is_err());
    }
}
