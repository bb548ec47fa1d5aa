#![forbid(unsafe_code)]
//! Scrub target selection.
//!
//! Each storage unit owns one [`ScrubJob`] holding a shallow and a deep
//! [`Target`]. The job picks which of the two should run next using the
//! layered ranking in [`compare`].

pub mod compare;
pub mod job;
pub mod target;

pub use compare::{Side, TargetRank, rank, rank_future, rank_ripe};
pub use job::ScrubJob;
pub use target::{Target, TargetSchedule};
