//! Grid topology for the Skywatch radar-grid simulation.
//!
//! Maps a worker's linear rank to a 2-D grid coordinate and back,
//! computes the up-to-4 valid neighbor coordinates of each cell, and
//! derives fixed world positions from the inter-node separation. All of
//! it is computed once at startup; nothing here mutates afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod error;
pub mod neighbors;

pub use dims::GridDims;
pub use error::GridError;
pub use neighbors::NeighborSet;
