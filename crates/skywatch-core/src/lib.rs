//! Core types for the Skywatch radar-grid simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by every Skywatch crate: world
//! vectors, grid coordinates, compass directions, and the wire records
//! exchanged between sensors and the aggregator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod message;
pub mod vector;

pub use coord::{Direction, GridCoord};
pub use message::{ActivationEvent, DetectionReport, SensorMessage};
pub use vector::Vector;
