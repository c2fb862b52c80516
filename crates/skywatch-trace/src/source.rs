//! The sequential ground-truth source contract.

use skywatch_core::Vector;

/// A sequential source of ground-truth target positions.
///
/// Called exactly once per round per worker. Implementations must be
/// infallible: past exhaustion they keep returning
/// [`Vector::OFF_GRID`] for every further call, never an error. Each
/// worker owns its source privately — sources are consumed on the
/// worker's own thread and never shared.
pub trait TruthSource: Send {
    /// The target's position for the next round, or the out-of-range
    /// sentinel once the source is exhausted.
    fn next_sample(&mut self) -> Vector;
}

/// A truth source replaying a fixed script, for tests and generated
/// trajectories. Yields the scripted samples in order, then the sentinel
/// forever.
#[derive(Clone, Debug)]
pub struct ScriptedTruth {
    samples: std::vec::IntoIter<Vector>,
}

impl ScriptedTruth {
    /// Create a source over a fixed sample script.
    pub fn new(samples: Vec<Vector>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }

    /// A source that is exhausted from the first call.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl TruthSource for ScriptedTruth {
    fn next_sample(&mut self) -> Vector {
        self.samples.next().unwrap_or(Vector::OFF_GRID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_yields_samples_then_sentinel_forever() {
        let mut source = ScriptedTruth::new(vec![Vector::new(1, 2), Vector::new(3, 4)]);
        assert_eq!(source.next_sample(), Vector::new(1, 2));
        assert_eq!(source.next_sample(), Vector::new(3, 4));
        for _ in 0..10 {
            assert_eq!(source.next_sample(), Vector::OFF_GRID);
        }
    }

    #[test]
    fn empty_is_exhausted_immediately() {
        let mut source = ScriptedTruth::empty();
        assert_eq!(source.next_sample(), Vector::OFF_GRID);
    }
}
