//! Ranking of scrub targets.
//!
//! Targets are ordered in layers. Readiness is a hard gate: a ripe target
//! always outranks one that is not yet ripe. Within each side of the gate
//! the keys below are compared left to right and the first non-tie decides.
//!
//! | Both ripe | Neither ripe |
//! |-----------|--------------|
//! | higher urgency | earlier `not_before` |
//! | earlier `scheduled_at` | higher urgency |
//! | deep before shallow | earlier `scheduled_at` |
//! | earlier `not_before` | deep before shallow |
//!
//! When every key ties the rank is [`TargetRank::Tie`]. Selection then falls
//! back to the right-hand operand ([`Side::pick`]). That fallback only makes
//! the choice deterministic and carries no scheduling meaning.

use scrubq_types::ScrubTime;
use std::cmp::Ordering;

use crate::target::Target;

/// Outcome of comparing two targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRank {
    LeftBetter,
    RightBetter,
    Tie,
}

impl TargetRank {
    /// `Less` means the left operand should run first.
    #[must_use]
    pub fn as_ordering(self) -> Ordering {
        match self {
            Self::LeftBetter => Ordering::Less,
            Self::RightBetter => Ordering::Greater,
            Self::Tie => Ordering::Equal,
        }
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::LeftBetter => Self::RightBetter,
            Self::RightBetter => Self::LeftBetter,
            Self::Tie => Self::Tie,
        }
    }
}

impl From<Ordering> for TargetRank {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Self::LeftBetter,
            Ordering::Greater => Self::RightBetter,
            Ordering::Equal => Self::Tie,
        }
    }
}

/// Which operand of a comparison was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Resolve a rank into a choice. Ties go to the right-hand operand.
    #[must_use]
    pub fn pick(rank: TargetRank) -> Self {
        match rank {
            TargetRank::LeftBetter => Self::Left,
            TargetRank::RightBetter | TargetRank::Tie => Self::Right,
        }
    }

    #[must_use]
    pub fn select<'t, T>(self, left: &'t T, right: &'t T) -> &'t T {
        match self {
            Self::Left => left,
            Self::Right => right,
        }
    }
}

// ── Keys ────────────────────────────────────────────────────────────────────

// For 'higher is better' keys the right operand goes on the left.
fn higher_urgency(l: &Target, r: &Target) -> Ordering {
    r.urgency().cmp(&l.urgency())
}

fn deeper(l: &Target, r: &Target) -> Ordering {
    r.level().cmp(&l.level())
}

fn earlier_scheduled(l: &Target, r: &Target) -> Ordering {
    l.scheduled_at().cmp(&r.scheduled_at())
}

fn earlier_not_before(l: &Target, r: &Target) -> Ordering {
    l.not_before().cmp(&r.not_before())
}

// ── Rules ───────────────────────────────────────────────────────────────────

/// Rank two targets that are both ripe.
#[must_use]
pub fn rank_ripe(l: &Target, r: &Target) -> TargetRank {
    higher_urgency(l, r)
        .then_with(|| earlier_scheduled(l, r))
        .then_with(|| deeper(l, r))
        .then_with(|| earlier_not_before(l, r))
        .into()
}

/// Rank two targets that are both waiting for their `not_before`.
#[must_use]
pub fn rank_future(l: &Target, r: &Target) -> TargetRank {
    earlier_not_before(l, r)
        .then_with(|| higher_urgency(l, r))
        .then_with(|| earlier_scheduled(l, r))
        .then_with(|| deeper(l, r))
        .into()
}

/// Rank two targets relative to `now`, gating on ripeness first.
#[must_use]
pub fn rank(now: ScrubTime, l: &Target, r: &Target) -> TargetRank {
    match (l.is_ripe(now), r.is_ripe(now)) {
        (true, true) => rank_ripe(l, r),
        (true, false) => TargetRank::LeftBetter,
        (false, true) => TargetRank::RightBetter,
        (false, false) => rank_future(l, r),
    }
}
