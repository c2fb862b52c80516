//! The aggregator: drain the uplink, persist the trail, count down to
//! shutdown.

use std::io::Write;

use crossbeam_channel::Receiver;
use indexmap::IndexMap;
use skywatch_core::{GridCoord, SensorMessage};
use skywatch_trace::TrailWriter;

use crate::cluster::SimError;

/// The singleton aggregator state, moved onto its own thread.
///
/// The aggregator has no round concept and sits on no barrier: it
/// blocks on its inbox, logs every activation in receipt order, and
/// decrements `outstanding` for each termination marker. Two events from
/// different workers for the same timestep may land in either order —
/// accepted behavior, not a defect.
pub(crate) struct Aggregator<W: Write> {
    pub inbox: Receiver<SensorMessage>,
    pub trail: TrailWriter<W>,
    /// Workers that have not yet sent their termination marker.
    pub outstanding: usize,
}

/// What the aggregator hands back at shutdown.
pub(crate) struct AggregateSummary<W> {
    /// Trail rows written (termination markers excluded).
    pub events_logged: u64,
    /// Per-source received-event counts, in first-receipt order. For
    /// end-of-run reporting only, not correctness-critical.
    pub events_by_source: IndexMap<GridCoord, u64>,
    /// The trail sink, flushed and released.
    pub sink: W,
}

impl<W: Write> Aggregator<W> {
    /// Receive until every worker has terminated, then flush and close
    /// the trail exactly once.
    pub fn run(mut self) -> Result<AggregateSummary<W>, SimError> {
        let mut events_by_source: IndexMap<GridCoord, u64> = IndexMap::new();
        while self.outstanding > 0 {
            let message = self.inbox.recv().map_err(|_| SimError::InboxDisconnected)?;
            match message {
                SensorMessage::Activation(event) => {
                    self.trail.write_event(&event)?;
                    *events_by_source.entry(event.source).or_insert(0) += 1;
                }
                SensorMessage::Termination { .. } => {
                    self.outstanding -= 1;
                }
            }
        }

        self.trail.flush()?;
        let events_logged = self.trail.rows_written();
        Ok(AggregateSummary {
            events_logged,
            events_by_source,
            sink: self.trail.into_inner(),
        })
    }
}
