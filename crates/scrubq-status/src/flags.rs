//! Per-unit scrub flags and their text form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Switches that modify how the current or next scrub of a unit behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrubFlags {
    /// Scheduling priority of the scrub. Not part of the text form.
    pub priority: u32,
    /// Repair inconsistencies found by a deep scrub without operator action.
    pub auto_repair: bool,
    /// The scrub verifies the outcome of a preceding repair.
    pub check_repair: bool,
    /// Follow up with a deep scrub if this scrub finds errors.
    pub deep_scrub_on_error: bool,
}

impl ScrubFlags {
    #[must_use]
    pub const fn new(auto_repair: bool, check_repair: bool, deep_scrub_on_error: bool) -> Self {
        Self {
            priority: 0,
            auto_repair,
            check_repair,
            deep_scrub_on_error,
        }
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Names of the set switches, in rendering order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.auto_repair, "auto-repair"),
            (self.check_repair, "check-repair"),
            (self.deep_scrub_on_error, "deep-scrub-on-error"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
    }

    /// True when no switch is set (the text form is empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.auto_repair || self.check_repair || self.deep_scrub_on_error)
    }
}

impl fmt::Display for ScrubFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
