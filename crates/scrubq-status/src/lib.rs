#![forbid(unsafe_code)]
//! Scrub status of storage units.
//!
//! A [`ScrubUnit`] owns its scrub job and flags; a [`StatusReporter`] turns
//! it into the concise status line that accompanies the unit in log output.

pub mod config;
pub mod flags;
pub mod reporter;
pub mod unit;

pub use config::{ActivityConfig, JobConfig, TargetConfig, UnitConfig};
pub use flags::ScrubFlags;
pub use reporter::{Cached, FlagsStrategy, FlagsText, Recompute, StatusLine, StatusReporter};
pub use unit::{ScrubActivity, ScrubUnit};
