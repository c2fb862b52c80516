//! Role dispatch: spawn the worker group and the aggregator, join them
//! into a run report.

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Barrier};
use std::thread;

use crossbeam_channel::unbounded;
use indexmap::IndexMap;
use skywatch_core::{Direction, GridCoord};
use skywatch_grid::GridDims;
use skywatch_sensor::Detector;
use skywatch_trace::{TraceError, TrailWriter, TruthSource};

use crate::aggregator::Aggregator;
use crate::config::{ConfigError, SimConfig};
use crate::links::build_links;
use crate::worker::SensorWorker;

// ── SimError ────────────────────────────────────────────────────

/// Errors that end a simulation run.
///
/// Transport failures are fatal by design: recovering from a lost
/// channel would require re-deriving a consistent round state across
/// every peer, which this protocol deliberately does not attempt.
#[derive(Debug)]
pub enum SimError {
    /// Configuration or participant startup failed.
    Config(ConfigError),
    /// Writing the activation trail failed.
    Trail(TraceError),
    /// A data-plane neighbor channel disconnected mid-run.
    LinkDisconnected {
        /// The worker that observed the failure.
        from: GridCoord,
        /// Which neighbor slot failed.
        direction: Direction,
    },
    /// A worker's channel to the aggregator disconnected mid-run.
    UplinkDisconnected {
        /// The worker that observed the failure.
        from: GridCoord,
    },
    /// Every uplink sender vanished before all termination markers
    /// arrived.
    InboxDisconnected,
    /// A participant thread panicked.
    WorkerPanicked {
        /// Thread name of the panicked participant.
        name: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Trail(e) => write!(f, "trail: {e}"),
            Self::LinkDisconnected { from, direction } => {
                write!(f, "worker {from}: {direction} neighbor link disconnected")
            }
            Self::UplinkDisconnected { from } => {
                write!(f, "worker {from}: aggregator uplink disconnected")
            }
            Self::InboxDisconnected => {
                write!(f, "aggregator inbox closed before all workers terminated")
            }
            Self::WorkerPanicked { name } => write!(f, "thread '{name}' panicked"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Trail(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TraceError> for SimError {
    fn from(e: TraceError) -> Self {
        Self::Trail(e)
    }
}

// ── RunReport ───────────────────────────────────────────────────

/// Outcome of a completed run: every worker terminated, the aggregator
/// shut down, and the trail sink was flushed and released.
pub struct RunReport<W> {
    /// Rounds executed by every worker.
    pub rounds: u32,
    /// Size of the worker group.
    pub workers: usize,
    /// Activation events the aggregator logged.
    pub events_logged: u64,
    /// Per-source logged-event counts, in first-receipt order.
    pub events_by_source: IndexMap<GridCoord, u64>,
    /// Activation events sent, summed over workers. Equals
    /// `events_logged` — the transport neither drops nor duplicates.
    pub activations_sent: u64,
    /// The trail sink, returned to the caller.
    pub sink: W,
}

impl<W> fmt::Debug for RunReport<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunReport")
            .field("rounds", &self.rounds)
            .field("workers", &self.workers)
            .field("events_logged", &self.events_logged)
            .field("activations_sent", &self.activations_sent)
            .finish()
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A configured simulation, ready to run.
///
/// [`run()`](Simulation::run) splits the participants into the two
/// communication groups the protocol requires: a worker per grid cell,
/// ranked 0..R*C-1 within its own group and wired to its neighbors, and
/// the singleton aggregator, which holds no grid coordinate and no
/// data-plane endpoint — only the uplink receiver.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    dims: GridDims,
}

impl Simulation {
    /// Validate the configuration and resolve the grid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dims = GridDims::new(config.rows, config.cols)?;
        Ok(Self { config, dims })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The resolved grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Execute one full run.
    ///
    /// `truth_for` supplies each worker's private ground-truth source,
    /// called once per rank at startup — sources are never shared across
    /// workers. `sink` receives the activation trail.
    ///
    /// Blocks until every participant thread has been joined. All
    /// workers run the same number of rounds; the aggregator exits once
    /// the last termination marker arrives.
    pub fn run<W, F, T>(&self, mut truth_for: F, sink: W) -> Result<RunReport<W>, SimError>
    where
        W: Write + Send + 'static,
        F: FnMut(usize, GridCoord) -> T,
        T: TruthSource + 'static,
    {
        let worker_count = self.dims.cell_count();
        let barrier = Arc::new(Barrier::new(worker_count));
        let (uplink_tx, uplink_rx) = unbounded();

        // Open the trail before anything runs: a failing sink is a
        // startup error, not a mid-run one.
        let trail = TrailWriter::new(sink)?;

        let mut worker_handles = Vec::with_capacity(worker_count);
        for (rank, links) in build_links(&self.dims).into_iter().enumerate() {
            let coord = self.dims.coord_of(rank);
            let worker = SensorWorker {
                coord,
                detector: Detector::new(
                    self.dims.world_position(coord, self.config.node_sep),
                    self.config.radar_range,
                    self.config.noise_bound,
                    self.config.seed ^ rank as u64,
                ),
                links,
                truth: Box::new(truth_for(rank, coord)),
                uplink: uplink_tx.clone(),
                barrier: Arc::clone(&barrier),
                rounds: self.config.rounds,
            };
            let name = format!("sensor-{}-{}", coord.row, coord.col);
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker.run())
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: format!("{name}: {e}"),
                })?;
            worker_handles.push((name, handle));
        }
        // Workers hold the only remaining uplink senders.
        drop(uplink_tx);

        let aggregator = Aggregator {
            inbox: uplink_rx,
            trail,
            outstanding: worker_count,
        };
        let aggregator_handle = thread::Builder::new()
            .name("aggregator".to_string())
            .spawn(move || aggregator.run())
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("aggregator: {e}"),
            })?;

        let mut activations_sent = 0;
        for (name, handle) in worker_handles {
            let summary = handle
                .join()
                .map_err(|_| SimError::WorkerPanicked { name })??;
            activations_sent += summary.activations_sent;
        }
        let summary = aggregator_handle.join().map_err(|_| SimError::WorkerPanicked {
            name: "aggregator".to_string(),
        })??;

        Ok(RunReport {
            rounds: self.config.rounds,
            workers: worker_count,
            events_logged: summary.events_logged,
            events_by_source: summary.events_by_source,
            activations_sent,
            sink: summary.sink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch_core::Vector;
    use skywatch_trace::ScriptedTruth;

    #[test]
    fn new_rejects_invalid_config() {
        let config = SimConfig {
            rounds: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::ZeroRounds)
        ));
    }

    #[test]
    fn quiet_run_logs_nothing_and_terminates() {
        // No target anywhere: every worker still runs all rounds, sends
        // its termination marker, and the aggregator shuts down cleanly.
        let config = SimConfig {
            rounds: 3,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config).unwrap();
        let report = sim
            .run(|_, _| ScriptedTruth::empty(), Vec::new())
            .unwrap();
        assert_eq!(report.workers, 20);
        assert_eq!(report.events_logged, 0);
        assert_eq!(report.activations_sent, 0);
        let out = String::from_utf8(report.sink).unwrap();
        assert_eq!(out.lines().count(), 1); // header only
    }

    #[test]
    fn single_cell_grid_runs_without_neighbors() {
        // Degenerate but legal: one worker, no links, quorum unreachable.
        let config = SimConfig {
            rows: 1,
            cols: 1,
            rounds: 2,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config).unwrap();
        let report = sim
            .run(
                |_, _| ScriptedTruth::new(vec![Vector::ZERO; 2]),
                Vec::new(),
            )
            .unwrap();
        assert_eq!(report.workers, 1);
        assert_eq!(report.events_logged, 0);
    }
}
