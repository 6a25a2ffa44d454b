// chromaconv/src/pair_stream.rs
//
// Decoder for the observation half of the paired sixtysix format (the .B
// file): an undelimited stream of fixed 6-byte (key, value) records. The
// stream carries no scan boundaries of its own; the scan index declares how
// many consecutive pairs each scan owns.

use crate::error::DecodeError;
use crate::utils::read_record;
use std::io::Read;

/// On-disk size of one observation record.
pub const PAIR_RECORD_SIZE: usize = 6;

/// One (key, value) observation.
///
/// Layout: bytes [0,2) little-endian signed key, bytes [2,6) little-endian
/// signed value. Keys are not range-checked and may repeat across records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationPair {
    pub key: i16,
    pub value: i32,
}

/// Lazy reader over an observation byte source. Yields pairs in file order
/// until the source is exhausted; not restartable. Same trailing-record
/// policy as the scan index reader.
pub struct PairStreamReader<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> PairStreamReader<R> {
    pub fn new(reader: R) -> Self {
        PairStreamReader {
            reader,
            done: false,
        }
    }

    /// Drain the reader into a fully materialized vector, stopping at the
    /// first error.
    pub fn read_all(self) -> Result<Vec<ObservationPair>, DecodeError> {
        self.collect()
    }
}

impl<R: Read> Iterator for PairStreamReader<R> {
    type Item = Result<ObservationPair, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = [0u8; PAIR_RECORD_SIZE];
        match read_record(&mut self.reader, &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n < PAIR_RECORD_SIZE => {
                self.done = true;
                Some(Err(DecodeError::TruncatedRecord {
                    record: "observation pair",
                    expected: PAIR_RECORD_SIZE,
                    got: n,
                }))
            }
            Ok(_) => Some(Ok(ObservationPair {
                key: i16::from_le_bytes([buf[0], buf[1]]),
                value: i32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]),
            })),
            Err(e) => {
                self.done = true;
                Some(Err(DecodeError::Io(e)))
            }
        }
    }
}

#[path = "pair_stream_test.rs"]
mod pair_stream_test;
