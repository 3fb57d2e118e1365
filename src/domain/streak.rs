//! Streak calculation and milestone tracking
//!
//! A habit's streak is advanced one completion at a time. Each completion
//! either continues the current run (done yesterday), starts a new run
//! (never done, or a gap of two or more days), or is ignored (already done
//! on that day).
//!
//! Milestones are tracked per run: `last_milestone` is reset when a new run
//! starts, so the day-one message greets every fresh start while the
//! seven-day message fires once per run, the first time it is reached.

use chrono::NaiveDate;
use crate::domain::{EffortEntry, EffortScore, Habit, Milestone};

/// State-machine view of a habit's streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    /// Never completed, or no streak recorded yet
    Fresh,
    /// A run of `n` consecutive days
    Active(u32),
}

impl StreakState {
    pub fn of(habit: &Habit) -> Self {
        match habit.streak {
            0 => StreakState::Fresh,
            n => StreakState::Active(n),
        }
    }
}

/// Result of applying one completion to a habit
#[derive(Debug, Clone, PartialEq)]
pub enum StreakOutcome {
    /// The habit was already marked done on that day
    Unchanged,
    /// The completion was recorded
    Advanced {
        habit: Habit,
        /// Milestone reached by this completion, announced at most once
        milestone: Option<Milestone>,
    },
}

impl StreakOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, StreakOutcome::Unchanged)
    }
}

/// Apply a completion on `completion_date` to `habit`
///
/// The input habit is left untouched; the updated record is returned in
/// [`StreakOutcome::Advanced`] for the caller to persist.
pub fn advance(habit: &Habit, completion_date: NaiveDate, effort: EffortScore) -> StreakOutcome {
    if habit.is_done_on(completion_date) {
        return StreakOutcome::Unchanged;
    }

    let mut updated = habit.clone();
    let continues = match (habit.last_done, completion_date.pred_opt()) {
        (Some(last), Some(yesterday)) => last == yesterday,
        _ => false,
    };

    if continues {
        updated.streak += 1;
    } else {
        // New run: earlier milestones may be announced again
        updated.streak = 1;
        updated.last_milestone = 0;
    }

    updated.last_done = Some(completion_date);
    updated.longest_streak = updated.longest_streak.max(updated.streak);
    updated.effort_log.push(EffortEntry::new(completion_date, effort));

    let milestone = Milestone::for_streak(updated.streak)
        .filter(|m| updated.last_milestone < m.streak());
    if let Some(reached) = milestone {
        updated.last_milestone = reached.streak();
    }

    tracing::debug!(
        "Advanced habit {}: streak {} (longest {}), milestone {:?}",
        updated.id,
        updated.streak,
        updated.longest_streak,
        milestone
    );

    StreakOutcome::Advanced {
        habit: updated,
        milestone,
    }
}
