//! Effort log entries for habit completions
//!
//! Every time a habit is marked done, one `EffortEntry` is appended to the
//! habit's effort log. The weekly summary is computed from these entries.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::DomainError;

/// Self-reported effort for one completion, on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffortScore(u8);

impl EffortScore {
    /// Lowest accepted score
    pub const MIN: u8 = 1;
    /// Highest accepted score
    pub const MAX: u8 = 10;
    /// Score used when the client does not send one
    pub const DEFAULT: EffortScore = EffortScore(5);

    /// Create a score, rejecting values outside 1-10
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidEffort(format!(
                "Effort must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    /// Score from optional client input, defaulting to the mid-scale value
    pub fn from_optional(value: Option<u8>) -> Result<Self, DomainError> {
        value.map_or(Ok(Self::DEFAULT), Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for EffortScore {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A record of completing a habit on a specific day
///
/// Entries are never edited after they are appended; insertion order is
/// chronological because completions are only ever logged for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEntry {
    /// Which day this completion was for
    pub date: NaiveDate,
    /// Effort reported for the completion. Only new input is held to the
    /// 1-10 scale; stored values load as any JSON integer.
    pub effort: i64,
}

impl EffortEntry {
    pub fn new(date: NaiveDate, effort: EffortScore) -> Self {
        Self {
            date,
            effort: i64::from(effort.value()),
        }
    }

    /// Check whether this entry falls within `[start, end]`
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.date && self.date <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_bounds() {
        assert!(EffortScore::new(1).is_ok());
        assert!(EffortScore::new(10).is_ok());
        assert!(EffortScore::new(0).is_err());
        assert!(EffortScore::new(11).is_err());
    }

    #[test]
    fn test_missing_effort_defaults_to_five() {
        let score = EffortScore::from_optional(None).unwrap();
        assert_eq!(score.value(), 5);
        assert!(EffortScore::from_optional(Some(42)).is_err());
    }

    #[test]
    fn test_entry_window_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let entry = EffortEntry::new(day, EffortScore::DEFAULT);
        assert!(entry.is_within(day, day));
        assert!(!entry.is_within(day.succ_opt().unwrap(), day.succ_opt().unwrap()));
    }

    #[test]
    fn test_stored_effort_outside_scale_deserializes() {
        let entry: EffortEntry =
            serde_json::from_str(r#"{"date": "2024-03-10", "effort": -1}"#).unwrap();
        assert_eq!(entry.effort, -1);

        let entry: EffortEntry =
            serde_json::from_str(r#"{"date": "2024-03-10", "effort": 300}"#).unwrap();
        assert_eq!(entry.effort, 300);
    }
}
