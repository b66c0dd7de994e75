//! Classifier Adapter
//!
//! Translates variable-shape provider responses into the feature bundle the
//! risk aggregator consumes. Unexpected shapes never fail the workflow; they
//! fall back to neutral/zero values. Only transport failures (handled by the
//! inference client) surface as errors.

pub mod shape;
pub mod text;
pub mod image;


pub use shape::{LabelScore, ResponseShape};
pub use text::{self_harm_proxy, top_emotion, toxicity_score, TextSignals};
pub use image::{classify_label, facial_emotion, scene_sentiment, ImageSignals};
