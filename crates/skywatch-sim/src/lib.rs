//! Round-synchronized engine for the Skywatch radar-grid simulation.
//!
//! A [`Simulation`] dispatches one OS thread per grid sensor plus a
//! singleton aggregator, wires the two communication planes once at
//! startup, and drives every worker through lock-step rounds until the
//! configured timestep count is exhausted.
//!
//! # Architecture
//!
//! ```text
//! Worker Threads (R x C)                     Aggregator Thread
//!     |                                          |
//!     | truth.next_sample()                      |
//!     | detector.observe()                       |
//!     | link.tx.send(report)  [per neighbor]     |
//!     | link.rx.recv()        [per neighbor]     |
//!     | tally -> quorum? ----uplink------------->| inbox.recv()
//!     |                    [Activation]          | trail.write_event()
//!     | barrier.wait()                           |
//!     |   ... next round ...                     |
//!     | ----uplink-----------------------------> | outstanding -= 1
//!     |   [Termination, once, after last round]  | == 0 -> Shutdown
//! ```
//!
//! Workers exchange detection reports only with grid-adjacent peers over
//! dedicated channels built from the topology; the aggregator sits on no
//! barrier and no data-plane link, so it can never block a worker. There
//! is no recovery path: a stalled participant stalls the run, by design.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;

mod aggregator;
mod links;
mod worker;

pub use cluster::{RunReport, SimError, Simulation};
pub use config::{ConfigError, SimConfig};
pub use worker::{fuse_estimates, QUORUM};
