//! Sequential ground-truth track reader.

use std::io::BufRead;

use skywatch_core::Vector;

use crate::error::TraceError;
use crate::source::TruthSource;

/// Reads a delimited ground-truth track: a header row, then one
/// `time,x,y` integer row per timestep.
///
/// Generic over `R: BufRead` so tests can use byte slices and production
/// code can use `BufReader<File>`. Opening consumes and discards the
/// header row; every later interaction goes through
/// [`TruthSource::next_sample`], which by contract cannot fail — end of
/// input, the optional row limit, and malformed rows all exhaust the
/// reader, after which it yields [`Vector::OFF_GRID`] forever.
#[derive(Debug)]
pub struct TrackReader<R: BufRead> {
    input: R,
    limit: Option<u64>,
    rows_read: u64,
    exhausted: bool,
}

impl<R: BufRead> TrackReader<R> {
    /// Open a track stream, consuming the header row.
    pub fn open(mut input: R) -> Result<Self, TraceError> {
        let mut header = String::new();
        if input.read_line(&mut header)? == 0 {
            return Err(TraceError::MissingHeader);
        }
        Ok(Self {
            input,
            limit: None,
            rows_read: 0,
            exhausted: false,
        })
    }

    /// Cap the number of data rows read, mirroring a configured timestep
    /// count shorter than the underlying record count.
    pub fn with_limit(mut self, rows: u64) -> Self {
        self.limit = Some(rows);
        self
    }

    /// Number of data rows successfully read so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Parse `time,x,y`, yielding the x and y fields.
    fn parse_row(line: &str) -> Option<Vector> {
        let mut fields = line.split(',').skip(1);
        let x = fields.next()?.trim().parse().ok()?;
        let y = fields.next()?.trim().parse().ok()?;
        Some(Vector::new(x, y))
    }
}

impl<R: BufRead + Send> TruthSource for TrackReader<R> {
    fn next_sample(&mut self) -> Vector {
        if self.exhausted || self.limit.is_some_and(|limit| self.rows_read >= limit) {
            return Vector::OFF_GRID;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.exhausted = true;
                Vector::OFF_GRID
            }
            Ok(_) => match Self::parse_row(&line) {
                Some(sample) => {
                    self.rows_read += 1;
                    sample
                }
                None => {
                    self.exhausted = true;
                    Vector::OFF_GRID
                }
            },
        }
    }
}
