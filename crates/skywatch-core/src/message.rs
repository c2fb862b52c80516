//! Wire records exchanged during a simulation run.
//!
//! Two planes carry these records: adjacent workers swap
//! [`DetectionReport`]s every round, and workers send [`SensorMessage`]s
//! up to the aggregator. All records are plain tagged values moved over
//! typed channels; none is ever retried or deduplicated.

use crate::coord::GridCoord;
use crate::vector::Vector;

/// A worker's per-round outbound payload, broadcast identically to every
/// valid neighbor.
///
/// When the target is outside this sensor's range, `detected` is false
/// and the estimate is the zero vector; receivers must not interpret the
/// estimate of a non-detecting report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionReport {
    /// Whether the target was within this sensor's radar range.
    pub detected: bool,
    /// Noise-perturbed position estimate; meaningful only when `detected`.
    pub estimate: Vector,
}

impl DetectionReport {
    /// The report a sensor sends when it sees nothing this round.
    pub const NOTHING: DetectionReport = DetectionReport {
        detected: false,
        estimate: Vector::ZERO,
    };
}

/// A confirmed activation, emitted to the aggregator when a worker's
/// neighbor quorum is met.
///
/// `sensors` holds one slot per compass direction in
/// [`Direction::ALL`](crate::Direction::ALL) order; a slot carries the
/// neighbor's coordinate when that neighbor reported detection this
/// round, and is absent when the neighbor is missing (grid boundary) or
/// did not detect. Absent slots serialize as the `-1,-1` pair in the
/// trail log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationEvent {
    /// Simulation round the quorum was met in.
    pub timestep: u32,
    /// Coordinate of the fusing worker.
    pub source: GridCoord,
    /// Coordinate-wise truncating mean of the detecting neighbors'
    /// estimates.
    pub fused: Vector,
    /// Per-direction detecting-neighbor coordinates.
    pub sensors: [Option<GridCoord>; 4],
}

/// A message on the worker-to-aggregator uplink.
///
/// Termination is an explicit variant rather than a reserved timestep
/// value, so the aggregator never inspects magic numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorMessage {
    /// A quorum was met; log one trail row.
    Activation(ActivationEvent),
    /// The sending worker finished its last round. Sent exactly once per
    /// worker; drives the aggregator's shutdown countdown.
    Termination {
        /// Coordinate of the finished worker.
        source: GridCoord,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_report_is_zeroed() {
        assert!(!DetectionReport::NOTHING.detected);
        assert_eq!(DetectionReport::NOTHING.estimate, Vector::ZERO);
    }

    #[test]
    fn activation_event_slots_follow_direction_order() {
        let event = ActivationEvent {
            timestep: 3,
            source: GridCoord::new(1, 2),
            fused: Vector::new(250, 250),
            sensors: [
                Some(GridCoord::new(0, 2)), // up
                Some(GridCoord::new(1, 3)), // right
                None,                       // down: did not detect
                Some(GridCoord::new(1, 1)), // left
            ],
        };
        assert_eq!(event.sensors[0], Some(GridCoord::new(0, 2)));
        assert_eq!(event.sensors[2], None);
    }
}
