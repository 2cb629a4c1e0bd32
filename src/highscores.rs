//! Best score record
//!
//! Persisted to LocalStorage as JSON. Older saves stored a bare integer,
//! which is still accepted.

use serde::{Deserialize, Serialize};

/// The best run so far
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScore {
    /// Obstacles cleared
    pub score: u32,
    /// Level reached in that run
    #[serde(default)]
    pub level: u32,
    /// Unix timestamp (ms) when achieved, 0 if unknown
    #[serde(default)]
    pub timestamp: f64,
}

impl HighScore {
    pub fn new(score: u32, level: u32, timestamp: f64) -> Self {
        Self {
            score,
            level,
            timestamp,
        }
    }

    /// Parse a stored value: JSON record or bare integer
    ///
    /// Anything else (empty, negative, garbage) yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(score) = raw.parse::<u32>() {
            return Some(Self::new(score, 0, 0.0));
        }
        serde_json::from_str::<HighScore>(raw).ok()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Would `score` replace this record?
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.score
    }

    /// One-line HUD text, e.g. "Best 23 · level 5 · 3 days ago"
    ///
    /// Level and age are left out when the record does not carry them.
    pub fn summary(&self, now_ms: f64) -> String {
        if self.score == 0 {
            return "No best yet".to_string();
        }
        let mut parts = vec![format!("Best {}", self.score)];
        if self.level > 0 {
            parts.push(format!("level {}", self.level));
        }
        if self.timestamp > 0.0 {
            parts.push(format_age(now_ms, self.timestamp));
        }
        parts.join(" · ")
    }
}

/// Relative age of a record, e.g. "3 days ago"
pub fn format_age(now_ms: f64, timestamp_ms: f64) -> String {
    if timestamp_ms <= 0.0 {
        return "N/A".to_string();
    }
    let diff_mins = (now_ms - timestamp_ms).max(0.0) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_integer() {
        assert_eq!(HighScore::parse("17"), Some(HighScore::new(17, 0, 0.0)));
        assert_eq!(HighScore::parse(" 3\n"), Some(HighScore::new(3, 0, 0.0)));
    }

    #[test]
    fn test_parse_json_record() {
        let rec = HighScore::parse(r#"{"score":42,"level":7,"timestamp":1000.0}"#);
        assert_eq!(rec, Some(HighScore::new(42, 7, 1000.0)));
        let partial = HighScore::parse(r#"{"score":5}"#);
        assert_eq!(partial, Some(HighScore::new(5, 0, 0.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(HighScore::parse(""), None);
        assert_eq!(HighScore::parse("-4"), None);
        assert_eq!(HighScore::parse("NaN"), None);
        assert_eq!(HighScore::parse(r#"{"level":2}"#), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let rec = HighScore::new(12, 3, 99.0);
        let json = rec.to_json().expect("serializable");
        assert_eq!(HighScore::parse(&json), Some(rec));
    }

    #[test]
    fn test_beaten_by_is_strict() {
        let rec = HighScore::new(10, 2, 0.0);
        assert!(!rec.beaten_by(10));
        assert!(rec.beaten_by(11));
    }

    #[test]
    fn test_format_age() {
        let min = 60_000.0;
        let now = 1_000_000_000.0;
        assert_eq!(format_age(now, 0.0), "N/A");
        assert_eq!(format_age(now, now - 10_000.0), "Just now");
        assert_eq!(format_age(now, now - 1.5 * min), "1 min ago");
        assert_eq!(format_age(now, now - 5.0 * min), "5 mins ago");
        assert_eq!(format_age(now, now - 61.0 * min), "1 hour ago");
        assert_eq!(format_age(now, now - 24.5 * 60.0 * min), "Yesterday");
        assert_eq!(format_age(now, now - 72.0 * 60.0 * min), "3 days ago");
    }

    #[test]
    fn test_summary() {
        let day = 24.0 * 60.0 * 60_000.0;
        let now = 10.0 * day;
        assert_eq!(HighScore::default().summary(now), "No best yet");
        assert_eq!(HighScore::new(23, 0, 0.0).summary(now), "Best 23");
        assert_eq!(
            HighScore::new(23, 5, now - 3.0 * day).summary(now),
            "Best 23 · level 5 · 3 days ago"
        );
    }
}
