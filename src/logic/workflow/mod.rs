//! Workflow Module
//!
//! Drives text and image analysis runs end to end.

pub mod types;
pub mod orchestrator;


pub use types::{ImageAnalysis, TextAnalysis, WorkflowError, AUTH_HINT, TEXT_EXPLANATION};
pub use orchestrator::Analyzer;
