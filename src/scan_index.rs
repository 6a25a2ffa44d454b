// chromaconv/src/scan_index.rs
//
// Decoder for the scan index half of the paired sixtysix format (the .A
// file): fixed 10-byte records carrying a time tick and the number of
// observation pairs that belong to each scan.

use crate::error::DecodeError;
use crate::utils::{read_record, round4};
use std::io::Read;

/// On-disk size of one scan record.
pub const SCAN_RECORD_SIZE: usize = 10;

/// The scan clock runs at 60000 ticks per minute.
const TICKS_PER_MINUTE: f64 = 60000.0;

/// One fixed-width record from the scan index file.
///
/// Layout: bytes [0,6) reserved, bytes [6,8) big-endian unsigned time tick,
/// bytes [8,10) big-endian signed observation count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    /// Ordinal position in the file, starting at 0
    pub index: usize,
    /// Raw 16-bit time tick (1/60000 minute units)
    pub raw_tick: u16,
    /// Tick decoded to minutes, rounded to 4 decimal places
    pub time_minutes: f64,
    /// Number of observation pairs declared for this scan
    pub observation_count: i16,
}

/// Lazy reader over a scan index byte source. Yields records in file order
/// until the source is exhausted; not restartable.
///
/// A zero-length read is a clean end of stream. A trailing partial record is
/// reported as [`DecodeError::TruncatedRecord`] rather than discarded.
pub struct ScanIndexReader<R: Read> {
    reader: R,
    next_index: usize,
    done: bool,
}

impl<R: Read> ScanIndexReader<R> {
    pub fn new(reader: R) -> Self {
        ScanIndexReader {
            reader,
            next_index: 0,
            done: false,
        }
    }

    /// Drain the reader into a fully materialized vector, stopping at the
    /// first error.
    pub fn read_all(self) -> Result<Vec<ScanRecord>, DecodeError> {
        self.collect()
    }
}

impl<R: Read> Iterator for ScanIndexReader<R> {
    type Item = Result<ScanRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = [0u8; SCAN_RECORD_SIZE];
        match read_record(&mut self.reader, &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n < SCAN_RECORD_SIZE => {
                self.done = true;
                Some(Err(DecodeError::TruncatedRecord {
                    record: "scan index",
                    expected: SCAN_RECORD_SIZE,
                    got: n,
                }))
            }
            Ok(_) => {
                let raw_tick = u16::from_be_bytes([buf[6], buf[7]]);
                let observation_count = i16::from_be_bytes([buf[8], buf[9]]);
                let index = self.next_index;
                self.next_index += 1;
                Some(Ok(ScanRecord {
                    index,
                    raw_tick,
                    time_minutes: round4(raw_tick as f64 / TICKS_PER_MINUTE),
                    observation_count,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(DecodeError::Io(e)))
            }
        }
    }
}

#[path = "scan_index_test.rs"]
mod scan_index_test;
