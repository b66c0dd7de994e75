//! NeuroShield core - mental-health self-screening engine
//!
//! Classifier signals in, a 1-10 risk score, a tiered recommendation and an
//! optional emergency intervention out.

pub mod api;
pub mod constants;
pub mod logic;
