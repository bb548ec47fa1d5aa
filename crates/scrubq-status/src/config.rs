//! JSON description of a unit, used by the CLI and by fixtures.
//!
//! ```json
//! {
//!   "id": 7,
//!   "primary": true,
//!   "activity": "idle",
//!   "job": {
//!     "name": "pg 7.1a",
//!     "blocked": false,
//!     "shallow": { "urgency": 1, "not_before": 1700000000, "scheduled_at": 1699990000 },
//!     "deep":    { "urgency": 3, "not_before": 1700050000, "scheduled_at": 1699900000 }
//!   },
//!   "flags": { "auto_repair": true }
//! }
//! ```
//!
//! Every field is optional; timestamps are whole seconds since the epoch.

use scrubq_error::{Result, ScrubError};
use scrubq_sched::{ScrubJob, Target, TargetSchedule};
use scrubq_types::{ScrubTime, UnitId, Urgency};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::flags::ScrubFlags;
use crate::unit::ScrubUnit;

/// Activity a unit is built in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityConfig {
    #[default]
    Idle,
    /// Active on the job's best target at build time.
    Active,
    /// Active with no target resolved yet.
    ActiveUnresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub urgency: i32,
    pub not_before: u64,
    pub scheduled_at: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            urgency: Urgency::PERIODIC_REGULAR.0,
            not_before: 0,
            scheduled_at: 0,
        }
    }
}

impl TargetConfig {
    fn schedule(&self) -> TargetSchedule {
        TargetSchedule::new(
            ScrubTime::from_secs(self.not_before),
            ScrubTime::from_secs(self.scheduled_at),
        )
    }

    fn urgency(&self, field: &'static str) -> Result<Urgency> {
        if self.urgency < Urgency::OFF.0 {
            return Err(ScrubError::InvalidConfig {
                field,
                reason: format!("urgency must not be negative (got {})", self.urgency),
            });
        }
        Ok(Urgency(self.urgency))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub name: String,
    pub blocked: bool,
    pub shallow: TargetConfig,
    pub deep: TargetConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: "scrub-job".to_owned(),
            blocked: false,
            shallow: TargetConfig::default(),
            deep: TargetConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitConfig {
    pub id: u64,
    pub primary: bool,
    pub activity: ActivityConfig,
    pub job: JobConfig,
    pub flags: ScrubFlags,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            id: 0,
            primary: true,
            activity: ActivityConfig::default(),
            job: JobConfig::default(),
            flags: ScrubFlags::default(),
        }
    }
}

impl UnitConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ScrubError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the live unit. An `active` unit picks its target as of `now`.
    pub fn build(&self, now: ScrubTime) -> Result<ScrubUnit> {
        if self.job.name.trim().is_empty() {
            return Err(ScrubError::InvalidConfig {
                field: "job.name",
                reason: "must not be empty".to_owned(),
            });
        }
        let shallow = Target::shallow(
            self.job.shallow.urgency("job.shallow.urgency")?,
            self.job.shallow.schedule(),
        );
        let deep = Target::deep(
            self.job.deep.urgency("job.deep.urgency")?,
            self.job.deep.schedule(),
        );
        let job =
            ScrubJob::new(self.job.name.clone(), shallow, deep).with_blocked(self.job.blocked);

        let mut unit = ScrubUnit::new(UnitId(self.id), job, self.flags).with_primary(self.primary);
        match self.activity {
            ActivityConfig::Idle => {}
            ActivityConfig::Active => {
                unit.start_scrub(now);
            }
            ActivityConfig::ActiveUnresolved => unit.start_unresolved(),
        }
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrubq_types::ScrubLevel;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = UnitConfig::from_json_str("{}").expect("parse");
        assert_eq!(cfg, UnitConfig::default());
        let unit = cfg.build(ScrubTime::from_secs(1)).expect("build");
        assert!(unit.is_primary());
        assert!(!unit.is_active());
        assert_eq!(unit.job().name(), "scrub-job");
    }

    #[test]
    fn active_unit_resolves_target_at_build_time() {
        let cfg = UnitConfig::from_json_str(
            r#"{
                "activity": "active",
                "job": {
                    "shallow": { "urgency": 2, "not_before": 10, "scheduled_at": 5 },
                    "deep": { "urgency": 4, "not_before": 100, "scheduled_at": 5 }
                },
                "flags": { "check_repair": true, "priority": 3 }
            }"#,
        )
        .expect("parse");
        let unit = cfg.build(ScrubTime::from_secs(50)).expect("build");
        let target = unit.active_target().expect("active target");
        assert_eq!(target.level(), ScrubLevel::Shallow);
        assert_eq!(unit.flags().priority, 3);
        assert_eq!(unit.cached_flags_text(), "check-repair");
    }

    #[test]
    fn unresolved_activity() {
        let cfg = UnitConfig::from_json_str(r#"{ "activity": "active-unresolved" }"#)
            .expect("parse");
        let unit = cfg.build(ScrubTime::EPOCH).expect("build");
        assert!(unit.is_active());
        assert!(unit.active_target().is_none());
    }

    #[test]
    fn rejects_empty_job_name() {
        let cfg = UnitConfig::from_json_str(r#"{ "job": { "name": "  " } }"#).expect("parse");
        let err = cfg.build(ScrubTime::EPOCH).expect_err("empty name");
        assert_eq!(err.field(), Some("job.name"));
    }

    #[test]
    fn rejects_negative_urgency() {
        let cfg = UnitConfig::from_json_str(r#"{ "job": { "deep": { "urgency": -1 } } }"#)
            .expect("parse");
        let err = cfg.build(ScrubTime::EPOCH).expect_err("negative urgency");
        assert_eq!(err.field(), Some("job.deep.urgency"));
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = UnitConfig::from_json_str(r#"{ "flags": { "auto_repiar": true } }"#)
            .expect_err("typo");
        assert!(matches!(err, ScrubError::Parse(_)));
    }
}
