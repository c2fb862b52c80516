//! Local detection logic for a single Skywatch sensor.
//!
//! A [`Detector`] owns one sensor's fixed world position and its private
//! noise stream. Each round it turns the target's true position into a
//! [`DetectionReport`](skywatch_core::DetectionReport): a strict range
//! test plus a noise-perturbed estimate whose error shrinks to zero at
//! the sensor's own location.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod detector;

pub use detector::Detector;
