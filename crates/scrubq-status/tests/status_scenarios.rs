//! End-to-end status lines for the states a unit can be in.

use std::io::Write;

use scrubq_sched::{ScrubJob, Target, TargetSchedule};
use scrubq_status::{
    Cached, FlagsStrategy, Recompute, ScrubFlags, ScrubUnit, StatusReporter, UnitConfig,
};
use scrubq_types::{ScrubTime, UnitId, Urgency};

const NOW: ScrubTime = ScrubTime::from_secs(1_700_000_000);

fn ripe(secs_ago: u64) -> TargetSchedule {
    TargetSchedule::new(
        ScrubTime::from_secs(NOW.as_secs() - secs_ago),
        ScrubTime::from_secs(NOW.as_secs() - 2 * secs_ago),
    )
}

fn unit(shallow: Urgency, deep: Urgency, flags: ScrubFlags) -> ScrubUnit {
    let job = ScrubJob::new(
        "pg 1.7",
        Target::shallow(shallow, ripe(3_600)),
        Target::deep(deep, ripe(7_200)),
    );
    ScrubUnit::new(UnitId(17), job, flags)
}

/// Render with both strategies, insist they agree, and return the line.
fn show_both(unit: &ScrubUnit) -> String {
    let recomputed = StatusReporter::new(unit, Recompute).render(NOW);
    let cached = StatusReporter::new(unit, Cached).render(NOW);
    assert_eq!(recomputed, cached, "strategies disagree");
    recomputed
}

#[test]
fn idle_non_primary_is_silent() {
    let u = unit(Urgency(3), Urgency(5), ScrubFlags::default()).with_primary(false);
    assert_eq!(show_both(&u), "");
}

#[test]
fn active_blocked_with_target() {
    let mut u = unit(Urgency(2), Urgency(5), ScrubFlags::new(true, false, false));
    u.job_mut().set_blocked(true);
    let target = u.start_scrub(NOW);
    assert_eq!(target.urgency(), Urgency(5));
    assert_eq!(show_both(&u), "(*blocked*,U(5),auto-repair)");
}

#[test]
fn active_unresolved_without_flags() {
    let mut u = unit(Urgency(2), Urgency(5), ScrubFlags::default());
    u.start_unresolved();
    assert_eq!(show_both(&u), "(in-act)");
}

#[test]
fn idle_with_periodic_next_is_silent() {
    let u = unit(
        Urgency::PERIODIC_REGULAR,
        Urgency::PERIODIC_REGULAR,
        ScrubFlags::new(true, true, true),
    );
    assert!(!u.job().best_at(NOW).is_high_priority());
    assert_eq!(show_both(&u), "");
}

#[test]
fn idle_with_deep_next_pads_urgency() {
    let u = unit(Urgency::PERIODIC_REGULAR, Urgency(3), ScrubFlags::default());
    assert!(u.job().best_at(NOW).is_deep());
    assert_eq!(show_both(&u), "[next-scrub:dp,U(3)      ]");
}

#[test]
fn finishing_returns_to_idle_line() {
    let mut u = unit(Urgency(1), Urgency(4), ScrubFlags::new(false, false, true));
    u.start_scrub(NOW);
    assert_eq!(show_both(&u), "(U(4),deep-scrub-on-error)");
    u.finish_scrub();
    assert_eq!(show_both(&u), "[next-scrub:dp,U(4)      ]");
}

#[test]
fn unit_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{
            "id": 4,
            "activity": "active",
            "job": {{
                "name": "pg 4.2",
                "blocked": true,
                "shallow": {{ "urgency": 1, "not_before": 100, "scheduled_at": 50 }},
                "deep": {{ "urgency": 2, "not_before": 900, "scheduled_at": 10 }}
            }},
            "flags": {{ "auto_repair": true, "deep_scrub_on_error": true }}
        }}"#
    )
    .expect("write unit file");

    let cfg = UnitConfig::load(file.path()).expect("load");
    let u = cfg.build(ScrubTime::from_secs(500)).expect("build");
    assert_eq!(u.id(), UnitId(4));
    assert_eq!(
        u.show(ScrubTime::from_secs(500), FlagsStrategy::Cached),
        "(*blocked*,U(1),auto-repair,deep-scrub-on-error)"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = UnitConfig::load(&dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, scrubq_error::ScrubError::Io(_)));
}
