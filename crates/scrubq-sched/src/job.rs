//! The per-unit scrub job: exactly one shallow and one deep target.

use scrubq_types::{ScrubLevel, ScrubTime};
use serde::Serialize;
use tracing::trace;

use crate::compare::{Side, rank, rank_future};
use crate::target::Target;

/// Scrub job owned by a single storage unit.
///
/// Both targets are held by value and never handed out mutably, so
/// selection is a pure read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrubJob {
    name: String,
    blocked: bool,
    shallow: Target,
    deep: Target,
}

impl ScrubJob {
    /// Build a job from its two targets.
    ///
    /// `shallow` must be a shallow target and `deep` a deep one.
    #[must_use]
    pub fn new(name: impl Into<String>, shallow: Target, deep: Target) -> Self {
        debug_assert_eq!(shallow.level(), ScrubLevel::Shallow, "shallow slot");
        debug_assert_eq!(deep.level(), ScrubLevel::Deep, "deep slot");
        Self {
            name: name.into(),
            blocked: false,
            shallow,
            deep,
        }
    }

    #[must_use]
    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True while something outside the scheduler prevents the job from running.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    #[must_use]
    pub fn shallow(&self) -> &Target {
        &self.shallow
    }

    #[must_use]
    pub fn deep(&self) -> &Target {
        &self.deep
    }

    /// The target that comes up next when the clock is ignored.
    #[must_use]
    pub fn best_overall(&self) -> &Target {
        Side::pick(rank_future(&self.shallow, &self.deep)).select(&self.shallow, &self.deep)
    }

    /// The target that should run next at `now`.
    #[must_use]
    pub fn best_at(&self, now: ScrubTime) -> &Target {
        let best =
            Side::pick(rank(now, &self.shallow, &self.deep)).select(&self.shallow, &self.deep);
        trace!(
            job = %self.name,
            %now,
            level = %best.level(),
            urgency = %best.urgency(),
            ripe = best.is_ripe(now),
            "best scrub target"
        );
        best
    }
}
