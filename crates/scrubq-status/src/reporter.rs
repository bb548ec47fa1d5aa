//! Concise scrub status line of a storage unit.
//!
//! Only primaries report. The line has one of three shapes:
//!
//! ```text
//! active, target known:    ([*blocked*,]<urgency>[,<flags>])
//! active, target unknown:  (in-act[-*blocked*][,<flags>])
//! idle, high-priority next: [next-scrub:<sh|dp>,<urgency padded to 10>]
//! ```
//!
//! An idle unit whose next target is a regular periodic scrub prints nothing.
//! The output is parsed by log readers, so the grammar is fixed.
//!
//! The flag text can be produced two ways, selected through [`FlagsText`]:
//! [`Recompute`] formats the unit's flags on every call, [`Cached`] returns
//! the text the unit formatted once when it was built. Both yield the same
//! bytes; they differ only in where the formatting cost is paid.

use scrubq_types::ScrubTime;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::unit::{ScrubActivity, ScrubUnit};

/// Source of a unit's flag text.
pub trait FlagsText {
    fn flags_text<'u>(&self, unit: &'u ScrubUnit) -> Cow<'u, str>;
}

/// Format the flags afresh on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recompute;

impl FlagsText for Recompute {
    fn flags_text<'u>(&self, unit: &'u ScrubUnit) -> Cow<'u, str> {
        Cow::Owned(unit.flags().to_string())
    }
}

/// Serve the text formatted when the unit was constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cached;

impl FlagsText for Cached {
    fn flags_text<'u>(&self, unit: &'u ScrubUnit) -> Cow<'u, str> {
        Cow::Borrowed(unit.cached_flags_text())
    }
}

/// Runtime choice between [`Recompute`] and [`Cached`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlagsStrategy {
    #[default]
    Recompute,
    Cached,
}

impl FlagsStrategy {
    pub const ALL: [Self; 2] = [Self::Recompute, Self::Cached];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recompute => "recompute",
            Self::Cached => "cached",
        }
    }
}

impl FlagsText for FlagsStrategy {
    fn flags_text<'u>(&self, unit: &'u ScrubUnit) -> Cow<'u, str> {
        match self {
            Self::Recompute => Recompute.flags_text(unit),
            Self::Cached => Cached.flags_text(unit),
        }
    }
}

impl fmt::Display for FlagsStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagsStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recompute" => Ok(Self::Recompute),
            "cached" => Ok(Self::Cached),
            other => Err(format!("unknown flags strategy: {other}")),
        }
    }
}

// ── Reporter ────────────────────────────────────────────────────────────────

/// Renders the status line of one unit with a fixed flag-text strategy.
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter<'u, S> {
    unit: &'u ScrubUnit,
    strategy: S,
}

impl<'u, S: FlagsText> StatusReporter<'u, S> {
    pub fn new(unit: &'u ScrubUnit, strategy: S) -> Self {
        Self { unit, strategy }
    }

    /// Displayable status line as of `now`.
    pub fn at(&self, now: ScrubTime) -> StatusLine<'_, 'u, S> {
        StatusLine {
            reporter: self,
            now,
        }
    }

    pub fn write_to<W: fmt::Write>(&self, out: &mut W, now: ScrubTime) -> fmt::Result {
        write!(out, "{}", self.at(now))
    }

    #[must_use]
    pub fn render(&self, now: ScrubTime) -> String {
        self.at(now).to_string()
    }
}

/// A status line bound to an instant. Formatting it evaluates the unit.
pub struct StatusLine<'r, 'u, S> {
    reporter: &'r StatusReporter<'u, S>,
    now: ScrubTime,
}

impl<S: FlagsText> fmt::Display for StatusLine<'_, '_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.reporter.unit;
        if !unit.is_primary() {
            return Ok(());
        }

        match unit.activity() {
            ScrubActivity::Active { target } => {
                let flags = self.reporter.strategy.flags_text(unit);
                let sep = if flags.is_empty() { "" } else { "," };
                let blocked = unit.job().is_blocked();
                match target {
                    Some(target) => write!(
                        f,
                        "({}{}{}{})",
                        if blocked { "*blocked*," } else { "" },
                        target.urgency(),
                        sep,
                        flags
                    ),
                    None => write!(
                        f,
                        "(in-act{}{}{})",
                        if blocked { "-*blocked*" } else { "" },
                        sep,
                        flags
                    ),
                }
            }
            ScrubActivity::Idle => {
                let next = unit.job().best_at(self.now);
                if !next.is_high_priority() {
                    return Ok(());
                }
                write!(
                    f,
                    "[next-scrub:{},{:10.10}]",
                    next.level().short_name(),
                    next.urgency_txt()
                )
            }
        }
    }
}
