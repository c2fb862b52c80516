//! Activation-trail writer.

use std::io::Write;

use skywatch_core::ActivationEvent;

use crate::error::TraceError;

/// Header row of the activation trail. `src_y`/`src_x` are the fusing
/// worker's row and column; the sensor pairs follow in compass slot
/// order (up, right, down, left), `-1,-1` marking an absent or
/// non-detecting slot.
pub const TRAIL_HEADER: &str = "time, x, y, src_y, src_x, sensors (y1,x1,y2,x2,...)";

/// Appends activation events to a delimited trail.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. The header row is written immediately
/// on construction; afterwards the trail is append-only, one row per
/// event in receipt order.
#[derive(Debug)]
pub struct TrailWriter<W: Write> {
    writer: W,
    rows_written: u64,
}

impl<W: Write> TrailWriter<W> {
    /// Create a trail writer, immediately writing the header row.
    pub fn new(mut writer: W) -> Result<Self, TraceError> {
        writeln!(writer, "{TRAIL_HEADER}")?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Append one row for a received activation event.
    ///
    /// Column order is fixed: timestep, fused x, fused y, source row,
    /// source col, then the four sensor slots as row,col pairs.
    pub fn write_event(&mut self, event: &ActivationEvent) -> Result<(), TraceError> {
        write!(
            self.writer,
            "{},{},{},{},{}",
            event.timestep, event.fused.x, event.fused.y, event.source.row, event.source.col,
        )?;
        for slot in &event.sensors {
            match slot {
                Some(coord) => write!(self.writer, ",{},{}", coord.row, coord.col)?,
                None => write!(self.writer, ",-1,-1")?,
            }
        }
        writeln!(self.writer)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), TraceError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of event rows written so far (the header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
