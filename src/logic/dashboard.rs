//! Dashboard statistics over the score history

use serde::Serialize;

use crate::logic::storage::ScoreRecord;

/// One chart point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub timestamp: i64,
    pub score: u8,
}

/// Trend summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Oldest first
    pub series: Vec<TrendPoint>,
    /// 0 when there is no history
    pub highest: u8,
    pub average: f64,
    pub mood: &'static str,
}

impl DashboardSummary {
    /// Build from a newest-first history snapshot
    pub fn from_history(records: &[ScoreRecord]) -> Self {
        let series: Vec<TrendPoint> = records
            .iter()
            .rev()
            .map(|r| TrendPoint {
                timestamp: r.timestamp,
                score: r.score.value(),
            })
            .collect();

        let highest = series.iter().map(|p| p.score).max().unwrap_or(0);
        let average = if series.is_empty() {
            0.0
        } else {
            series.iter().map(|p| p.score as f64).sum::<f64>() / series.len() as f64
        };

        Self {
            series,
            highest,
            average,
            mood: mood_label(average),
        }
    }

    /// Average with one decimal
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

pub fn mood_label(average: f64) -> &'static str {
    if average >= 7.0 {
        "High Risk"
    } else if average >= 5.0 {
        "Moderate"
    } else {
        "Stable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::RiskScore;

    fn record(score: u8, timestamp: i64) -> ScoreRecord {
        ScoreRecord {
            score: RiskScore::try_from(score).unwrap(),
            timestamp,
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = DashboardSummary::from_history(&[]);
        assert!(summary.series.is_empty());
        assert_eq!(summary.highest, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.mood, "Stable");
        assert_eq!(summary.average_display(), "0.0");
    }

    #[test]
    fn test_series_is_chronological() {
        // newest first, as stored
        let records = [record(8, 300), record(3, 200), record(6, 100)];
        let summary = DashboardSummary::from_history(&records);

        let timestamps: Vec<i64> = summary.series.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![100, 200, 300]);
        assert_eq!(summary.highest, 8);
        assert_eq!(summary.mood, "Moderate");
        assert_eq!(summary.average_display(), "5.7");
    }

    #[test]
    fn test_mood_thresholds() {
        assert_eq!(mood_label(7.0), "High Risk");
        assert_eq!(mood_label(6.99), "Moderate");
        assert_eq!(mood_label(5.0), "Moderate");
        assert_eq!(mood_label(4.9), "Stable");
    }
}
