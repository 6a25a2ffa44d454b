// chromaconv/src/matrix.rs
//
// Correlates the two sixtysix streams: partitions the observation pairs
// across scans by consuming each scan's declared count in order, then
// reconstructs dense rows over the sorted union of all observed keys.

use crate::error::DecodeError;
use crate::pair_stream::ObservationPair;
use crate::scan_index::ScanRecord;
use std::io::{self, Write};

/// One dense output row. `values` is aligned to the matrix key set, one
/// entry per key, zero where the scan carried no observation for that key.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub time_minutes: f64,
    pub values: Vec<i32>,
}

/// The assembled dense matrix: one row per scan, one column per distinct
/// key. `keys` doubles as the CSV header.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Sorted, deduplicated keys over the whole observation stream
    pub keys: Vec<i16>,
    pub rows: Vec<Row>,
}

impl Matrix {
    /// Serialize per the writer contract: a `Time (min)` header followed by
    /// one column per key, then one line per row with the time at exactly 4
    /// decimal places and each value as a plain integer.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "Time (min)")?;
        for key in &self.keys {
            write!(writer, ",{}", key)?;
        }
        for row in &self.rows {
            write!(writer, "\n{:.4}", row.time_minutes)?;
            for value in &row.values {
                write!(writer, ",{}", value)?;
            }
        }
        Ok(())
    }
}

/// Sorted distinct keys over the full pair stream. Computed once, before any
/// row is built; fixed for the lifetime of the matrix.
pub fn key_set(pairs: &[ObservationPair]) -> Vec<i16> {
    let mut keys: Vec<i16> = pairs.iter().map(|p| p.key).collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Build the dense matrix from fully materialized scan and pair sequences.
///
/// Pairs are consumed with a monotonic cursor, never by removing from the
/// front of the sequence. Each scan takes exactly its declared count of
/// consecutive pairs; a negative count takes none. When one key appears more
/// than once within a single scan's allotment, the later pair in consumption
/// order wins.
///
/// The pair stream must be exactly the concatenation of every scan's
/// observations: if the counts overrun the stream, or pairs remain after the
/// last scan, the whole assembly fails with [`DecodeError::StreamMismatch`]
/// and no partial matrix is returned.
pub fn assemble(
    scans: &[ScanRecord],
    pairs: &[ObservationPair],
) -> Result<Matrix, DecodeError> {
    let keys = key_set(pairs);
    let declared: usize = scans
        .iter()
        .map(|s| s.observation_count.max(0) as usize)
        .sum();
    if declared != pairs.len() {
        return Err(DecodeError::StreamMismatch {
            declared,
            available: pairs.len(),
        });
    }

    let mut rows = Vec::with_capacity(scans.len());
    let mut cursor = 0usize;
    for scan in scans {
        let count = scan.observation_count.max(0) as usize;
        let mut values = vec![0i32; keys.len()];
        for pair in &pairs[cursor..cursor + count] {
            let slot = keys
                .binary_search(&pair.key)
                .expect("key set covers every pair key");
            values[slot] = pair.value;
        }
        cursor += count;
        rows.push(Row {
            time_minutes: scan.time_minutes,
            values,
        });
    }

    Ok(Matrix { keys, rows })
}

#[path = "matrix_test.rs"]
mod matrix_test;
