//! Scrub-side state of one storage unit.

use scrubq_sched::{ScrubJob, Target};
use scrubq_types::{ScrubTime, UnitId};
use tracing::debug;

use crate::flags::ScrubFlags;
use crate::reporter::{FlagsStrategy, FlagsText, StatusReporter};

/// Whether a scrub is running on the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubActivity {
    Idle,
    /// A scrub is in progress. `target` is `None` until the scrub has
    /// resolved which of the job's targets it is serving.
    Active { target: Option<Target> },
}

/// A storage unit as seen by the scrub scheduler.
///
/// The unit owns its [`ScrubJob`] outright. Flags are fixed at construction
/// and their text is formatted once, right there; since nothing can change
/// the flags afterwards the cached text never needs refreshing.
#[derive(Debug, Clone)]
pub struct ScrubUnit {
    id: UnitId,
    primary: bool,
    activity: ScrubActivity,
    flags: ScrubFlags,
    cached_flags: String,
    job: ScrubJob,
}

impl ScrubUnit {
    /// Create an idle primary unit.
    #[must_use]
    pub fn new(id: UnitId, job: ScrubJob, flags: ScrubFlags) -> Self {
        let cached_flags = flags.to_string();
        debug!(unit = %id, job = job.name(), flags = %cached_flags, "scrub unit created");
        Self {
            id,
            primary: true,
            activity: ScrubActivity::Idle,
            flags,
            cached_flags,
            job,
        }
    }

    #[must_use]
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    #[must_use]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Only the primary of a unit schedules and reports scrubs.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    #[must_use]
    pub fn activity(&self) -> ScrubActivity {
        self.activity
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.activity, ScrubActivity::Active { .. })
    }

    #[must_use]
    pub fn active_target(&self) -> Option<&Target> {
        match &self.activity {
            ScrubActivity::Active { target } => target.as_ref(),
            ScrubActivity::Idle => None,
        }
    }

    #[must_use]
    pub fn flags(&self) -> &ScrubFlags {
        &self.flags
    }

    /// Flag text formatted at construction.
    #[must_use]
    pub fn cached_flags_text(&self) -> &str {
        &self.cached_flags
    }

    #[must_use]
    pub fn job(&self) -> &ScrubJob {
        &self.job
    }

    pub fn job_mut(&mut self) -> &mut ScrubJob {
        &mut self.job
    }

    /// Start scrubbing the job's best target at `now` and return it.
    pub fn start_scrub(&mut self, now: ScrubTime) -> Target {
        let target = *self.job.best_at(now);
        debug!(unit = %self.id, %target, "scrub started");
        self.activity = ScrubActivity::Active {
            target: Some(target),
        };
        target
    }

    /// Mark the unit active before a target has been chosen.
    pub fn start_unresolved(&mut self) {
        debug!(unit = %self.id, "scrub started, target unresolved");
        self.activity = ScrubActivity::Active { target: None };
    }

    pub fn finish_scrub(&mut self) {
        debug!(unit = %self.id, "scrub finished");
        self.activity = ScrubActivity::Idle;
    }

    pub fn reporter<S: FlagsText>(&self, strategy: S) -> StatusReporter<'_, S> {
        StatusReporter::new(self, strategy)
    }

    /// Concise status line at `now`, using the chosen flag-text strategy.
    #[must_use]
    pub fn show(&self, now: ScrubTime, strategy: FlagsStrategy) -> String {
        self.reporter(strategy).render(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrubq_sched::TargetSchedule;
    use scrubq_types::{ScrubLevel, Urgency};

    fn unit() -> ScrubUnit {
        let shallow = Target::shallow(
            Urgency::PERIODIC_REGULAR,
            TargetSchedule::new(ScrubTime::from_secs(50), ScrubTime::from_secs(10)),
        );
        let deep = Target::deep(
            Urgency::AFTER_REPAIR,
            TargetSchedule::new(ScrubTime::from_secs(200), ScrubTime::from_secs(10)),
        );
        ScrubUnit::new(UnitId(3), ScrubJob::new("pg 3.0", shallow, deep), ScrubFlags::default())
    }

    #[test]
    fn new_unit_is_idle_primary() {
        let u = unit();
        assert!(u.is_primary());
        assert!(!u.is_active());
        assert_eq!(u.active_target(), None);
        assert_eq!(u.cached_flags_text(), "");
    }

    #[test]
    fn start_scrub_takes_best_target_at_now() {
        let mut u = unit();
        let target = u.start_scrub(ScrubTime::from_secs(100));
        assert_eq!(target.level(), ScrubLevel::Shallow);
        assert_eq!(u.active_target(), Some(&target));

        u.finish_scrub();
        let target = u.start_scrub(ScrubTime::from_secs(300));
        assert_eq!(target.level(), ScrubLevel::Deep);
    }

    #[test]
    fn unresolved_then_finish() {
        let mut u = unit();
        u.start_unresolved();
        assert!(u.is_active());
        assert_eq!(u.active_target(), None);
        u.finish_scrub();
        assert_eq!(u.activity(), ScrubActivity::Idle);
    }

    #[test]
    fn cache_is_formatted_at_construction() {
        let flags = ScrubFlags::new(true, true, false);
        let u = ScrubUnit::new(UnitId(1), unit().job().clone(), flags);
        assert_eq!(u.cached_flags_text(), "auto-repair,check-repair");
        assert_eq!(u.flags(), &flags);
    }
}
