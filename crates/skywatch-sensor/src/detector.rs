//! Range-gated detection with distance-scaled measurement noise.

use rand::prelude::*;
use rand::rngs::ChaCha8Rng;
use skywatch_core::{DetectionReport, Vector};

/// One sensor's detection logic: a fixed world position, a strict radar
/// range, and a private seeded noise stream.
///
/// The noise model is uniform per axis in `[-noise_bound, +noise_bound]`,
/// scaled by `(distance / range)^2`: a target sitting on the sensor is
/// measured exactly, one at the edge of range carries the full bound.
/// Estimates are rounded to the nearest integer world unit.
///
/// Seeding is per worker — each worker derives its seed by combining a
/// run-wide base seed with its own rank, so concurrently-running sensors
/// draw uncorrelated sequences while a fixed base seed reproduces the
/// whole run.
#[derive(Debug)]
pub struct Detector {
    position: Vector,
    range: u32,
    noise_bound: f64,
    rng: ChaCha8Rng,
}

impl Detector {
    /// Create a detector at a fixed world position.
    pub fn new(position: Vector, range: u32, noise_bound: f64, seed: u64) -> Self {
        Self {
            position,
            range,
            noise_bound,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// This sensor's fixed world position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Observe the target's true position for one round.
    ///
    /// Detection is strict: a target at exactly `range` units is not
    /// detected. Non-detecting reports carry a zero estimate. Each
    /// detecting observation consumes two draws from the noise stream
    /// (one per axis), so a detector's sequence of estimates depends only
    /// on its seed and the order of detecting rounds.
    pub fn observe(&mut self, truth: Vector) -> DetectionReport {
        let distance = self.position.distance_to(truth);
        if distance >= f64::from(self.range) {
            return DetectionReport::NOTHING;
        }

        let scale = (distance / f64::from(self.range)).powi(2);
        let dx = self.noise(scale);
        let dy = self.noise(scale);
        DetectionReport {
            detected: true,
            estimate: Vector::new(
                (f64::from(truth.x) + dx).round() as i32,
                (f64::from(truth.y) + dy).round() as i32,
            ),
        }
    }

    /// One uniform noise draw in `[-noise_bound, +noise_bound]`, scaled.
    fn noise(&mut self, scale: f64) -> f64 {
        let u: f64 = self.rng.random::<f64>() * 2.0 - 1.0;
        self.noise_bound * scale * u
    }
}
