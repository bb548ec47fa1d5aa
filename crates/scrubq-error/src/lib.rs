#![forbid(unsafe_code)]
//! Error types for scrubq.
//!
//! Target selection and status rendering are infallible: a job always owns
//! two targets and every timestamp is comparable. Errors only arise at the
//! edges, when a unit description is read from disk and turned into a live
//! unit.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `Io` | reading a unit file |
//! | `Parse` | malformed JSON in a unit description |
//! | `InvalidConfig` | a well-formed description with an unusable value |

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrubError {
    /// Operating system I/O error (wraps `std::io::Error`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The unit description could not be decoded.
    ///
    /// Carries the decoder's message so this crate stays free of any
    /// particular serialization format.
    #[error("parse error: {0}")]
    Parse(String),

    /// A decoded field holds a value the unit cannot be built from.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ScrubError {
    /// Name of the offending field, if the error concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { field, .. } => Some(field),
            Self::Io(_) | Self::Parse(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrubError>;
