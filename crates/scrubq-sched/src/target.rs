//! A single scrub candidate and its readiness schedule.

use scrubq_types::{ScrubLevel, ScrubTime, Urgency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a target may run, and when it was queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSchedule {
    /// Earliest instant the target may run.
    pub not_before: ScrubTime,
    /// Instant the target entered the schedule.
    pub scheduled_at: ScrubTime,
}

impl TargetSchedule {
    #[must_use]
    pub const fn new(not_before: ScrubTime, scheduled_at: ScrubTime) -> Self {
        Self {
            not_before,
            scheduled_at,
        }
    }
}

/// One scrub candidate of a unit.
///
/// Fields are fixed at construction. Ripeness is never stored; it is always
/// derived against a caller-supplied instant (see [`Target::is_ripe`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    level: ScrubLevel,
    urgency: Urgency,
    schedule: TargetSchedule,
}

impl Target {
    #[must_use]
    pub const fn new(level: ScrubLevel, urgency: Urgency, schedule: TargetSchedule) -> Self {
        Self {
            level,
            urgency,
            schedule,
        }
    }

    #[must_use]
    pub const fn shallow(urgency: Urgency, schedule: TargetSchedule) -> Self {
        Self::new(ScrubLevel::Shallow, urgency, schedule)
    }

    #[must_use]
    pub const fn deep(urgency: Urgency, schedule: TargetSchedule) -> Self {
        Self::new(ScrubLevel::Deep, urgency, schedule)
    }

    #[must_use]
    pub fn level(&self) -> ScrubLevel {
        self.level
    }

    #[must_use]
    pub fn is_deep(&self) -> bool {
        self.level.is_deep()
    }

    #[must_use]
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    #[must_use]
    pub fn schedule(&self) -> TargetSchedule {
        self.schedule
    }

    #[must_use]
    pub fn not_before(&self) -> ScrubTime {
        self.schedule.not_before
    }

    #[must_use]
    pub fn scheduled_at(&self) -> ScrubTime {
        self.schedule.scheduled_at
    }

    /// A target is ripe once `now` has reached its `not_before`.
    #[must_use]
    pub fn is_ripe(&self, now: ScrubTime) -> bool {
        self.schedule.not_before <= now
    }

    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.urgency.is_high_priority()
    }

    /// Urgency as shown in status lines, e.g. `U(3)`.
    #[must_use]
    pub fn urgency_txt(&self) -> String {
        self.urgency.to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} not_before={} scheduled_at={}",
            self.level.short_name(),
            self.urgency,
            self.schedule.not_before.as_secs(),
            self.schedule.scheduled_at.as_secs(),
        )
    }
}
