//! Error types for track reading and trail writing.

use std::fmt;
use std::io;

/// Errors that can occur opening a track or writing the trail.
///
/// Data exhaustion while reading is deliberately not represented here:
/// a [`TruthSource`](crate::TruthSource) never fails after open, it
/// yields the out-of-range sentinel instead.
#[derive(Debug)]
pub enum TraceError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The track input ended before the header row.
    MissingHeader,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingHeader => write!(f, "track input ended before the header row"),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MissingHeader => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
