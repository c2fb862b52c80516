//! Skywatch: a distributed radar-grid target tracking simulation.
//!
//! A fixed grid of stationary sensors cooperatively tracks a single
//! moving target using only neighbor-limited communication plus one
//! aggregator. This is the top-level facade crate re-exporting the
//! public API from all Skywatch sub-crates; for most users, adding
//! `skywatch` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skywatch::prelude::*;
//!
//! // Reference grid (4x5, 125-unit spacing), noise disabled, 5 rounds.
//! let config = SimConfig {
//!     rounds: 5,
//!     noise_bound: 0.0,
//!     ..SimConfig::default()
//! };
//! let sim = Simulation::new(config).unwrap();
//!
//! // Park the target over sensor (1,2): all four of its neighbors are
//! // within radar range every round.
//! let track = vec![Vector::new(250, 250); 5];
//! let report = sim
//!     .run(|_, _| ScriptedTruth::new(track.clone()), Vec::new())
//!     .unwrap();
//!
//! assert_eq!(report.events_logged, 5);
//! assert_eq!(report.events_by_source.get(&GridCoord::new(1, 2)), Some(&5));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skywatch-core` | Vectors, grid coordinates, wire records |
//! | [`grid`] | `skywatch-grid` | Topology resolver and neighbor sets |
//! | [`sensor`] | `skywatch-sensor` | Range-gated detection with noise |
//! | [`trace`] | `skywatch-trace` | Track reading and trail writing |
//! | [`sim`] | `skywatch-sim` | Round-synchronized worker/aggregator engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and wire records (`skywatch-core`).
///
/// Contains [`types::Vector`], [`types::GridCoord`],
/// [`types::Direction`], and the records exchanged between sensors and
/// the aggregator.
pub use skywatch_core as types;

/// Grid topology (`skywatch-grid`).
///
/// [`grid::GridDims`] maps worker ranks to coordinates, computes
/// neighbor sets, and derives world positions.
pub use skywatch_grid as grid;

/// Local detection (`skywatch-sensor`).
///
/// [`sensor::Detector`] decides range-gated detection and produces
/// noise-perturbed position estimates.
pub use skywatch_sensor as sensor;

/// Track and trail I/O (`skywatch-trace`).
///
/// [`trace::TrackReader`] feeds ground truth, [`trace::TrailWriter`]
/// persists the aggregator's activation trail.
pub use skywatch_trace as trace;

/// The simulation engine (`skywatch-sim`).
///
/// [`sim::Simulation`] dispatches the worker group and the aggregator
/// and joins them into a [`sim::RunReport`].
pub use skywatch_sim as sim;

/// Common imports for typical Skywatch usage.
///
/// ```rust
/// use skywatch::prelude::*;
/// ```
pub mod prelude {
    pub use skywatch_core::{
        ActivationEvent, DetectionReport, Direction, GridCoord, SensorMessage, Vector,
    };
    pub use skywatch_grid::{GridDims, GridError, NeighborSet};
    pub use skywatch_sensor::Detector;
    pub use skywatch_sim::{ConfigError, RunReport, SimConfig, SimError, Simulation, QUORUM};
    pub use skywatch_trace::{
        ScriptedTruth, TraceError, TrackReader, TrailWriter, TruthSource,
    };
}
