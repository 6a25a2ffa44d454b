// chromaconv/src/pear.rs
//
// Converter for the pear single-file format: a fixed 320-byte header, a
// packed table of 8-byte records (two little-endian signed 32-bit columns),
// and a fixed 480-byte footer.

use crate::error::DecodeError;
use crate::utils::{csv_sibling, open_input, read_record};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Fixed header length; record data starts here.
pub const HEADER_SIZE: u64 = 0x140;
/// Fixed footer length; record data stops this far from the end.
pub const FOOTER_SIZE: u64 = 480;

const RECORD_SIZE: usize = 8;

/// One row of the two-column trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PearRecord {
    pub time_ms: i32,
    pub intensity: i32,
}

/// Read the full record table between the fixed header and footer.
///
/// The data section must hold a whole number of records; a remainder is
/// reported as truncation rather than silently floored away.
pub fn read_records(path: &Path) -> Result<Vec<PearRecord>, DecodeError> {
    let mut file = open_input(path)?;
    let file_size = file.get_ref().metadata()?.len();
    if file_size < HEADER_SIZE + FOOTER_SIZE {
        return Err(DecodeError::TooSmall {
            expected: HEADER_SIZE + FOOTER_SIZE,
            actual: file_size,
        });
    }
    let data_size = file_size - HEADER_SIZE - FOOTER_SIZE;

    file.seek(SeekFrom::Start(HEADER_SIZE))?;
    let mut section = file.take(data_size);

    let mut records = Vec::with_capacity((data_size as usize) / RECORD_SIZE);
    loop {
        let mut buf = [0u8; RECORD_SIZE];
        match read_record(&mut section, &mut buf)? {
            0 => break,
            n if n < RECORD_SIZE => {
                return Err(DecodeError::TruncatedRecord {
                    record: "pear",
                    expected: RECORD_SIZE,
                    got: n,
                });
            }
            _ => records.push(PearRecord {
                time_ms: i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
                intensity: i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            }),
        }
    }
    Ok(records)
}

/// Serialize the trace with its column-name header. Every row ends with a
/// newline, trailing row included.
pub fn write_csv<W: Write>(records: &[PearRecord], writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "Time (ms),Intensity")?;
    for record in records {
        writeln!(writer, "{},{}", record.time_ms, record.intensity)?;
    }
    Ok(())
}

/// Decode `path` and write the CSV next to it (or to `output` when given).
pub fn convert_to_csv(path: &Path, output: Option<&Path>) -> Result<()> {
    let records = read_records(path)
        .with_context(|| format!("decoding pear file {}", path.display()))?;
    log::debug!("{}: {} trace records", path.display(), records.len());
    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        log::debug!("start of data: {:?}, end of data: {:?}", first, last);
    }

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => csv_sibling(path),
    };
    let mut writer = BufWriter::new(
        File::create(&output)
            .with_context(|| format!("creating output file {}", output.display()))?,
    );
    write_csv(&records, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("writing {}", output.display()))?;

    log::info!("{} written successfully", output.display());
    Ok(())
}

#[path = "pear_test.rs"]
mod pear_test;
