//! Milestones and the messages announced when a streak reaches them

use serde::{Deserialize, Serialize};

/// Streak lengths that trigger a one-time congratulatory message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// First day of a run
    FirstDay,
    /// Seventh consecutive day
    FirstWeek,
}

impl Milestone {
    /// All milestones, in ascending streak order
    pub const ALL: [Milestone; 2] = [Milestone::FirstDay, Milestone::FirstWeek];

    /// The milestone reached at exactly `streak` days, if any
    pub fn for_streak(streak: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.streak() == streak)
    }

    /// Streak length this milestone fires at
    pub fn streak(self) -> u32 {
        match self {
            Milestone::FirstDay => 1,
            Milestone::FirstWeek => 7,
        }
    }
}

/// Messages for one habit, one per milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTable {
    pub first_day: &'static str,
    pub first_week: &'static str,
}

impl MessageTable {
    pub fn get(&self, milestone: Milestone) -> &'static str {
        match milestone {
            Milestone::FirstDay => self.first_day,
            Milestone::FirstWeek => self.first_week,
        }
    }
}

const DEFAULT_MESSAGES: MessageTable = MessageTable {
    first_day: "Day one complete. You started.",
    first_week: "Seven days in. This habit is forming.",
};

/// Habit-specific tables, keyed by lowercased habit name
const HABIT_MESSAGES: &[(&str, MessageTable)] = &[
    (
        "gym",
        MessageTable {
            first_day: "Good start. Showing up matters more than intensity.",
            first_week: "Seven days in. Your body is adapting to consistency.",
        },
    ),
    (
        "read",
        MessageTable {
            first_day: "One reading session done. Knowledge compounds quietly.",
            first_week: "Seven days of reading. Focus is becoming a habit.",
        },
    ),
    (
        "walk",
        MessageTable {
            first_day: "You moved today. That is always a win.",
            first_week: "Seven days of movement. This supports everything else you do.",
        },
    ),
];

/// Keyed lookup of milestone messages with a default fallback
#[derive(Debug, Clone, Copy)]
pub struct MessageBook {
    entries: &'static [(&'static str, MessageTable)],
    fallback: MessageTable,
}

impl MessageBook {
    /// The built-in message book
    pub fn builtin() -> Self {
        Self {
            entries: HABIT_MESSAGES,
            fallback: DEFAULT_MESSAGES,
        }
    }

    /// Message table for a habit name, falling back to the default table
    pub fn table_for(&self, habit_name: &str) -> &MessageTable {
        let key = habit_name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, table)| table)
            .unwrap_or(&self.fallback)
    }

    pub fn message_for(&self, habit_name: &str, milestone: Milestone) -> &'static str {
        self.table_for(habit_name).get(milestone)
    }
}

impl Default for MessageBook {
    fn default() -> Self {
        Self::builtin()
    }
}
