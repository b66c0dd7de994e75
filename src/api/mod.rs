//! API Module
//!
//! Command handlers the hosting UI (or the terminal host in `main.rs`) calls.
//!
//! Usage:
//! - `api::commands::analyze_text(&ctx, text)`
//! - `api::get_dashboard_summary(&ctx)` - re-exported at the module root

pub mod commands;

pub use commands::*;
