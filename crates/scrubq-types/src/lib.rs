#![forbid(unsafe_code)]
//! Leaf value types shared by the scrub scheduling and status crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Identifier of the storage unit that owns a scrub job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit.{}", self.0)
    }
}

// ── Time ────────────────────────────────────────────────────────────────────

/// Instant on the scrub clock, measured from the Unix epoch.
///
/// Ordering is total: two stamps are equivalent exactly when they are equal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScrubTime(Duration);

impl ScrubTime {
    pub const EPOCH: Self = Self(Duration::ZERO);

    /// Current wall-clock time. Clocks set before the epoch read as `EPOCH`.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(Self::EPOCH, Self)
    }

    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    #[must_use]
    pub const fn from_duration(since_epoch: Duration) -> Self {
        Self(since_epoch)
    }

    #[must_use]
    pub const fn since_epoch(self) -> Duration {
        self.0
    }

    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0.as_secs()
    }

    /// Add an interval, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, delta: Duration) -> Option<Self> {
        self.0.checked_add(delta).map(Self)
    }

    /// Subtract an interval, clamping at the epoch.
    #[must_use]
    pub fn saturating_sub(self, delta: Duration) -> Self {
        Self(self.0.saturating_sub(delta))
    }
}

impl fmt::Display for ScrubTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0.as_secs(), self.0.subsec_micros())
    }
}

// ── Urgency ─────────────────────────────────────────────────────────────────

/// Scheduling urgency of a scrub target. Higher is more important.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Urgency(pub i32);

impl Urgency {
    pub const OFF: Self = Self(0);
    /// Plain periodic scrub; the highest urgency that is not reported.
    pub const PERIODIC_REGULAR: Self = Self(1);
    pub const OPERATOR_REQUESTED: Self = Self(2);
    pub const AFTER_REPAIR: Self = Self(3);
    pub const REPAIRING: Self = Self(4);
    pub const MUST_SCRUB: Self = Self(5);

    /// True for anything above a regular periodic scrub.
    #[must_use]
    pub fn is_high_priority(self) -> bool {
        self > Self::PERIODIC_REGULAR
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U({})", self.0)
    }
}

// ── Level ───────────────────────────────────────────────────────────────────

/// Depth of a scrub pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrubLevel {
    /// Metadata-only comparison across replicas.
    Shallow,
    /// Full read and checksum of every object.
    Deep,
}

impl ScrubLevel {
    #[must_use]
    pub fn is_deep(self) -> bool {
        matches!(self, Self::Deep)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Deep => "deep",
        }
    }

    /// Two-letter tag used in concise status lines.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Shallow => "sh",
            Self::Deep => "dp",
        }
    }
}

impl fmt::Display for ScrubLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
