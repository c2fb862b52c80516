//! Delimited-text I/O for Skywatch runs.
//!
//! Two halves mirror each other: [`TrackReader`] feeds a worker the
//! target's ground-truth track one `time,x,y` row per round, and
//! [`TrailWriter`] persists the aggregator's activation trail. Both are
//! generic over their byte stream so tests run against in-memory buffers
//! and production against buffered files.
//!
//! Reading is infallible past a successful open: once the track is
//! exhausted — by row limit, end of input, or a malformed row — every
//! further sample is the fixed out-of-range sentinel, so rounds beyond
//! the data length behave as "no detection possible anywhere."

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reader;
pub mod source;
pub mod writer;

pub use error::TraceError;
pub use reader::TrackReader;
pub use source::{ScriptedTruth, TruthSource};
pub use writer::{TrailWriter, TRAIL_HEADER};
