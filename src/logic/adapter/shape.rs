//! Provider Response Shapes
//!
//! Classifier endpoints answer with whatever shape the hosted model emits:
//! a batch of label lists, a single flat list, a lone object, or something
//! else entirely (error objects, strings, null). Parsing never fails; an
//! unknown shape simply yields no entries.

use regex::Regex;
use serde_json::Value;

/// One `{label, score}` entry
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// Missing or non-string labels are kept as `None`
    pub label: Option<String>,
    /// Missing or non-numeric scores count as 0
    pub score: f64,
}

impl LabelScore {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let label = obj.get("label").and_then(Value::as_str).map(str::to_string);
        let score = obj
            .get("score")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .unwrap_or(0.0);
        Some(Self { label, score })
    }
}

/// Tagged view over a raw provider response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[[{label, score}, ...], ...]`; bare objects next to lists form their own group
    Batched(Vec<Vec<LabelScore>>),
    /// `[{label, score}, ...]`
    Flat(Vec<LabelScore>),
    /// `{label, score}`
    Single(LabelScore),
    /// `[]`
    Empty,
    /// Anything else (error payloads, scalars, null)
    Unrecognized,
}

impl ResponseShape {
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::Array(items) if items.is_empty() => ResponseShape::Empty,
            Value::Array(items) if items.iter().any(Value::is_array) => {
                let groups = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Array(inner) => {
                            Some(inner.iter().filter_map(LabelScore::from_value).collect())
                        }
                        other => LabelScore::from_value(other).map(|entry| vec![entry]),
                    })
                    .collect();
                ResponseShape::Batched(groups)
            }
            Value::Array(items) => {
                let entries: Vec<LabelScore> = items.iter().filter_map(LabelScore::from_value).collect();
                if entries.is_empty() {
                    ResponseShape::Unrecognized
                } else {
                    ResponseShape::Flat(entries)
                }
            }
            Value::Object(obj) if obj.contains_key("label") => {
                LabelScore::from_value(value).map_or(ResponseShape::Unrecognized, ResponseShape::Single)
            }
            _ => ResponseShape::Unrecognized,
        }
    }

    /// The list a single-input request is answered with
    pub fn primary(&self) -> &[LabelScore] {
        match self {
            ResponseShape::Batched(groups) => groups.first().map(Vec::as_slice).unwrap_or(&[]),
            ResponseShape::Flat(entries) => entries,
            ResponseShape::Single(entry) => std::slice::from_ref(entry),
            ResponseShape::Empty | ResponseShape::Unrecognized => &[],
        }
    }

    /// Every entry, one nesting level flattened
    pub fn flattened(&self) -> Vec<&LabelScore> {
        match self {
            ResponseShape::Batched(groups) => groups.iter().flatten().collect(),
            _ => self.primary().iter().collect(),
        }
    }
}

/// Highest-scoring entry; ties keep provider order
pub fn top_entry<'a, I>(entries: I) -> Option<&'a LabelScore>
where
    I: IntoIterator<Item = &'a LabelScore>,
{
    entries.into_iter().fold(None, |best: Option<&LabelScore>, entry| match best {
        Some(b) if b.score >= entry.score => Some(b),
        _ => Some(entry),
    })
}

/// Score of the first entry (provider order) whose label matches
pub fn find_score(entries: &[LabelScore], pattern: &Regex) -> Option<f64> {
    entries
        .iter()
        .find(|e| e.label.as_deref().is_some_and(|l| pattern.is_match(l)))
        .map(|e| e.score)
}

/// Probabilities reported to the aggregator stay inside [0, 1]
pub(crate) fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
