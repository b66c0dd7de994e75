//! Emergency overlay content
//!
//! Static texts shown when the intervention fires.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Overlay headline
pub const HEADLINE: &str = "Critical emotional risk detected. You are not alone.";

/// Overlay body
pub const ADVICE: &str =
    "Please consider the options below. If you are in immediate danger, contact local emergency services.";

/// Motivation pool
pub const QUOTES: [&str; 15] = [
    "You are stronger than you think.",
    "This moment will pass; your courage will remain.",
    "Breathe. One step at a time.",
    "Your feelings are valid, and help is real.",
    "Rest is productive. Be kind to yourself.",
    "You\u{2019}re not alone in this.",
    "Progress over perfection.",
    "Your story isn\u{2019}t over yet.",
    "Asking for help is a sign of strength.",
    "Small steps lead to big changes.",
    "You matter more than you know.",
    "Let today be a fresh start.",
    "Storms don\u{2019}t last forever.",
    "You deserve peace and support.",
    "Keep going; we believe in you.",
];

/// Uniformly random quote
pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

/// Paced breathing, in seconds per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub inhale_secs: u32,
    pub hold_secs: u32,
    pub exhale_secs: u32,
}

impl BreathingPattern {
    pub const fn standard() -> Self {
        Self {
            inhale_secs: 4,
            hold_secs: 2,
            exhale_secs: 6,
        }
    }

    pub fn cycle_secs(&self) -> u32 {
        self.inhale_secs + self.hold_secs + self.exhale_secs
    }

    /// "Inhale 4s • Hold 2s • Exhale 6s"
    pub fn instructions(&self) -> String {
        format!(
            "Inhale {}s \u{2022} Hold {}s \u{2022} Exhale {}s",
            self.inhale_secs, self.hold_secs, self.exhale_secs
        )
    }
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self::standard()
    }
}

/// Crisis line (dialing is simulated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Helpline {
    pub region: &'static str,
    pub number: &'static str,
    pub service: &'static str,
}

pub const HELPLINES: [Helpline; 3] = [
    Helpline { region: "India", number: "9152987821", service: "Kiran" },
    Helpline { region: "USA", number: "988", service: "Suicide & Crisis Lifeline" },
    Helpline { region: "UK", number: "116 123", service: "Samaritans" },
];

/// One-line helpline summary
pub fn helpline_message() -> String {
    let lines: Vec<String> = HELPLINES
        .iter()
        .map(|h| format!("{}: {} ({})", h.region, h.number, h.service))
        .collect();
    format!(
        "Dialing helpline (simulated). If you need support: {}.",
        lines.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_quote_is_from_pool() {
        for _ in 0..50 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }

    #[test]
    fn test_breathing_pattern() {
        let pattern = BreathingPattern::default();
        assert_eq!(pattern.cycle_secs(), 12);
        assert_eq!(pattern.instructions(), "Inhale 4s \u{2022} Hold 2s \u{2022} Exhale 6s");
    }

    #[test]
    fn test_helpline_message() {
        assert_eq!(
            helpline_message(),
            "Dialing helpline (simulated). If you need support: India: 9152987821 (Kiran), \
             USA: 988 (Suicide & Crisis Lifeline), UK: 116 123 (Samaritans)."
        );
    }
}
