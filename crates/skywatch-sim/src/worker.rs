//! The per-sensor worker: one lock-step round state machine.

use std::sync::{Arc, Barrier};

use crossbeam_channel::Sender;
use skywatch_core::{ActivationEvent, DetectionReport, GridCoord, SensorMessage, Vector};
use skywatch_sensor::Detector;
use skywatch_trace::TruthSource;
use smallvec::SmallVec;

use crate::cluster::SimError;
use crate::links::LinkSet;

/// Minimum number of detecting neighbors for a confirmed activation.
///
/// A worker's own detection never counts toward this; with at most 4
/// neighbors the quorum demands a strict majority of a full neighbor
/// set.
pub const QUORUM: usize = 3;

/// One sensor's worker state, moved onto its own thread for the whole
/// run. Everything here is owned: the private truth source, the
/// detector with its noise stream, and the data-plane link endpoints.
pub(crate) struct SensorWorker {
    pub coord: GridCoord,
    pub detector: Detector,
    pub links: LinkSet,
    pub truth: Box<dyn TruthSource>,
    pub uplink: Sender<SensorMessage>,
    pub barrier: Arc<Barrier>,
    pub rounds: u32,
}

// Workers move across threads at spawn time; fails to compile if any
// field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SensorWorker>();
    }
};

/// What a worker hands back when its thread is joined.
#[derive(Debug)]
pub(crate) struct WorkerSummary {
    /// Activation events this worker sent to the aggregator.
    pub activations_sent: u64,
}

impl SensorWorker {
    /// Run every round, then send the termination marker and exit.
    ///
    /// Per round: read truth, detect locally, exchange reports with all
    /// neighbors, tally and fuse, report on quorum, and rendezvous at
    /// the barrier so no worker starts round N+1 before every worker has
    /// finished round N.
    pub fn run(mut self) -> Result<WorkerSummary, SimError> {
        let mut activations_sent = 0;
        for timestep in 0..self.rounds {
            let truth = self.truth.next_sample();
            let report = self.detector.observe(truth);

            // Scatter the same report to every neighbor. The channels
            // are unbounded: sends complete without waiting on peers.
            for link in &self.links {
                link.tx.send(report).map_err(|_| SimError::LinkDisconnected {
                    from: self.coord,
                    direction: link.direction,
                })?;
            }

            // Gather exactly one report per neighbor. The round proceeds
            // only once the full exchange set has completed; per-pair
            // FIFO channels guarantee these are current-round reports.
            let mut inbound: SmallVec<[DetectionReport; 4]> = SmallVec::new();
            for link in &self.links {
                let peer_report =
                    link.rx.recv().map_err(|_| SimError::LinkDisconnected {
                        from: self.coord,
                        direction: link.direction,
                    })?;
                inbound.push(peer_report);
            }

            if let Some(event) = self.tally(timestep, &inbound) {
                self.uplink
                    .send(SensorMessage::Activation(event))
                    .map_err(|_| SimError::UplinkDisconnected { from: self.coord })?;
                activations_sent += 1;
            }

            // All workers rendezvous before the next round starts.
            self.barrier.wait();
        }

        // Exactly one termination marker, after the last round. Workers
        // never wait for any aggregator reply.
        self.uplink
            .send(SensorMessage::Termination { source: self.coord })
            .map_err(|_| SimError::UplinkDisconnected { from: self.coord })?;

        Ok(WorkerSummary { activations_sent })
    }

    /// Count detecting neighbors and build the activation event when the
    /// quorum is met. Only neighbor reports count — a worker's own
    /// detection cannot trigger an event, so at most one event leaves a
    /// worker per round.
    fn tally(&self, timestep: u32, inbound: &[DetectionReport]) -> Option<ActivationEvent> {
        let n_activations = inbound.iter().filter(|r| r.detected).count();
        if n_activations < QUORUM {
            return None;
        }

        let fused = fuse_estimates(
            self.links
                .iter()
                .zip(inbound)
                .filter(|(_, r)| r.detected)
                .map(|(_, r)| r.estimate),
        );
        let mut sensors = [None; 4];
        for (link, r) in self.links.iter().zip(inbound) {
            if r.detected {
                sensors[link.direction.index()] = Some(link.peer);
            }
        }
        Some(ActivationEvent {
            timestep,
            source: self.coord,
            fused,
            sensors,
        })
    }
}

/// Fuse detecting neighbors' estimates into one: the coordinate-wise
/// arithmetic mean with truncating integer division.
///
/// # Panics
///
/// Panics if `estimates` is empty; the quorum check guarantees at least
/// [`QUORUM`] inputs.
pub fn fuse_estimates(estimates: impl IntoIterator<Item = Vector>) -> Vector {
    let mut sum_x: i64 = 0;
    let mut sum_y: i64 = 0;
    let mut n: i64 = 0;
    for estimate in estimates {
        sum_x += i64::from(estimate.x);
        sum_y += i64::from(estimate.y);
        n += 1;
    }
    assert!(n > 0, "fusion requires at least one estimate");
    Vector::new((sum_x / n) as i32, (sum_y / n) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::build_links;
    use crossbeam_channel::unbounded;
    use skywatch_grid::GridDims;
    use skywatch_trace::ScriptedTruth;

    // ── Fusion ──────────────────────────────────────────────────

    #[test]
    fn fusion_is_truncating_coordinate_mean() {
        let fused = fuse_estimates([
            Vector::new(10, 10),
            Vector::new(12, 8),
            Vector::new(11, 11),
        ]);
        // (33/3, 29/3) with truncating division.
        assert_eq!(fused, Vector::new(11, 9));
    }

    #[test]
    fn fusion_truncates_toward_zero_for_negatives() {
        let fused = fuse_estimates([Vector::new(-5, -5), Vector::new(-5, 4), Vector::new(3, -5)]);
        // (-7/3, -6/3) = (-2, -2), not floor.
        assert_eq!(fused, Vector::new(-2, -2));
    }

    #[test]
    fn fusion_of_one_estimate_is_identity() {
        assert_eq!(fuse_estimates([Vector::new(42, -17)]), Vector::new(42, -17));
    }

    #[test]
    #[should_panic(expected = "at least one estimate")]
    fn fusion_of_nothing_panics() {
        fuse_estimates([]);
    }

    // ── Tally ───────────────────────────────────────────────────

    /// An interior worker on a 3x3 grid, wired but never run.
    fn interior_worker() -> SensorWorker {
        let dims = GridDims::new(3, 3).unwrap();
        let mut links = build_links(&dims);
        let rank = dims.rank_of(GridCoord::new(1, 1));
        // tally() never touches the uplink; the dangling receiver is fine.
        let (uplink, _inbox) = unbounded();
        SensorWorker {
            coord: GridCoord::new(1, 1),
            detector: Detector::new(Vector::new(125, 125), 170, 0.0, 1),
            links: links.swap_remove(rank),
            truth: Box::new(ScriptedTruth::empty()),
            uplink,
            barrier: Arc::new(Barrier::new(1)),
            rounds: 0,
        }
    }

    fn detecting(x: i32, y: i32) -> DetectionReport {
        DetectionReport {
            detected: true,
            estimate: Vector::new(x, y),
        }
    }

    #[test]
    fn two_detecting_neighbors_is_below_quorum() {
        let worker = interior_worker();
        // Link order for an interior cell: up, right, down, left.
        let inbound = [
            detecting(10, 10),
            detecting(12, 8),
            DetectionReport::NOTHING,
            DetectionReport::NOTHING,
        ];
        assert!(worker.tally(0, &inbound).is_none());
    }

    #[test]
    fn three_detecting_neighbors_meets_quorum() {
        let worker = interior_worker();
        let inbound = [
            detecting(10, 10),
            detecting(12, 8),
            detecting(11, 11),
            DetectionReport::NOTHING,
        ];
        let event = worker.tally(7, &inbound).unwrap();
        assert_eq!(event.timestep, 7);
        assert_eq!(event.source, GridCoord::new(1, 1));
        assert_eq!(event.fused, Vector::new(11, 9));
        assert_eq!(
            event.sensors,
            [
                Some(GridCoord::new(0, 1)), // up detected
                Some(GridCoord::new(1, 2)), // right detected
                Some(GridCoord::new(2, 1)), // down detected
                None,                       // left did not detect
            ]
        );
    }

    #[test]
    fn non_detecting_estimates_are_excluded_from_fusion() {
        let worker = interior_worker();
        // The non-detecting slot carries a zero estimate that must not
        // drag the mean down.
        let inbound = [
            detecting(100, 100),
            detecting(100, 100),
            detecting(100, 100),
            DetectionReport::NOTHING,
        ];
        let event = worker.tally(0, &inbound).unwrap();
        assert_eq!(event.fused, Vector::new(100, 100));
    }
}
