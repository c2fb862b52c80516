//! Benchmark profiles for the Skywatch simulation workspace.
//!
//! Provides shared configurations so the individual benches measure the
//! same workloads: the reference 4x5 grid and a larger stress grid.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skywatch_core::Vector;
use skywatch_sim::SimConfig;

/// The reference profile: 4x5 grid, 21 rounds, noise enabled.
pub fn reference_profile() -> SimConfig {
    SimConfig::default()
}

/// A stress profile: 20x25 grid (500 workers), 50 rounds.
pub fn stress_profile() -> SimConfig {
    SimConfig {
        rows: 20,
        cols: 25,
        rounds: 50,
        ..SimConfig::default()
    }
}

/// A track that parks the target over world position `(x, y)` for every
/// round of the profile.
pub fn stationary_track(config: &SimConfig, x: i32, y: i32) -> Vec<Vector> {
    vec![Vector::new(x, y); config.rounds as usize]
}
