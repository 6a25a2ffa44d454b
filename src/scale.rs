// chromaconv/src/scale.rs
//
// Converter for the scale single-file format: a little-endian divisor (the
// absorbance factor) at a fixed offset, then marker-framed rows of one
// little-endian f32 time and 22 big-endian i32 absorbance columns.

use crate::error::DecodeError;
use crate::utils::{csv_sibling, open_input, read_record};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// File offset of the absorbance factor.
pub const FACTOR_OFFSET: u64 = 0x81;
/// File offset where row data begins.
pub const DATA_OFFSET: u64 = 0x200;

/// Every row starts with these two bytes; visible as a repeating pattern in
/// a hexdump of the file.
const ROW_MARKER: [u8; 2] = *b"HH";
/// Absorbance columns per row, one per detector wavelength.
const VALUE_COLUMNS: usize = 22;
/// Row body after the marker: one f32 time plus the absorbance columns.
const ROW_BODY_SIZE: usize = 4 + VALUE_COLUMNS * 4;

/// Detector wavelengths, in nm; fixed by the instrument.
const CSV_HEADER: &str =
    "Time (min),190,200,210,220,230,240,250,260,270,280,290,300,310,320,330,340,350,360,370,380,390,400";

/// One decoded row: retention time plus the scaled absorbance columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRow {
    pub time_minutes: f32,
    pub values: [i32; VALUE_COLUMNS],
}

/// Read the absorbance factor and every marker-framed row.
///
/// A zero-length read where the next marker would start is a clean end of
/// file; ending anywhere else inside a row is truncation.
pub fn read_table(path: &Path) -> Result<Vec<ScaleRow>, DecodeError> {
    let mut file = open_input(path)?;

    file.seek(SeekFrom::Start(FACTOR_OFFSET))?;
    let mut factor_buf = [0u8; 4];
    file.read_exact(&mut factor_buf)?;
    let factor = i32::from_le_bytes(factor_buf);
    if factor == 0 {
        return Err(DecodeError::ZeroFactor);
    }
    log::debug!("absorbance factor: {}", factor);

    file.seek(SeekFrom::Start(DATA_OFFSET))?;
    let mut rows = Vec::new();
    loop {
        let mut marker = [0u8; 2];
        match read_record(&mut file, &mut marker)? {
            0 => break,
            n if n < marker.len() => {
                return Err(DecodeError::TruncatedRecord {
                    record: "row marker",
                    expected: marker.len(),
                    got: n,
                });
            }
            _ => {}
        }
        if marker != ROW_MARKER {
            return Err(DecodeError::BadRowMarker {
                offset: DATA_OFFSET + rows.len() as u64 * (2 + ROW_BODY_SIZE as u64),
            });
        }

        let mut body = [0u8; ROW_BODY_SIZE];
        let n = read_record(&mut file, &mut body)?;
        if n < ROW_BODY_SIZE {
            return Err(DecodeError::TruncatedRecord {
                record: "scale row",
                expected: ROW_BODY_SIZE,
                got: n,
            });
        }

        let time_minutes = f32::from_le_bytes([body[0], body[1], body[2], body[3]]);
        let mut values = [0i32; VALUE_COLUMNS];
        for (i, slot) in values.iter_mut().enumerate() {
            let at = 4 + i * 4;
            let raw = i32::from_be_bytes([body[at], body[at + 1], body[at + 2], body[at + 3]]);
            // Float division then truncation toward zero
            *slot = (raw as f64 / factor as f64) as i32;
        }
        rows.push(ScaleRow {
            time_minutes,
            values,
        });
    }

    if let Some(last) = rows.last() {
        log::debug!("last row of data: {:?}", last);
    }
    Ok(rows)
}

/// Serialize with the fixed wavelength header: time at 4 decimal places,
/// then plain integers. No trailing newline after the last row.
pub fn write_csv<W: Write>(rows: &[ScaleRow], writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write!(writer, "{:.4}", row.time_minutes)?;
        for value in &row.values {
            write!(writer, ",{}", value)?;
        }
    }
    Ok(())
}

/// Decode `path` and write the CSV next to it (or to `output` when given).
pub fn convert_to_csv(path: &Path, output: Option<&Path>) -> Result<()> {
    let rows = read_table(path)
        .with_context(|| format!("decoding scale file {}", path.display()))?;
    log::debug!("{}: {} absorbance rows", path.display(), rows.len());

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => csv_sibling(path),
    };
    let mut writer = BufWriter::new(
        File::create(&output)
            .with_context(|| format!("creating output file {}", output.display()))?,
    );
    write_csv(&rows, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("writing {}", output.display()))?;

    log::info!("{} written successfully", output.display());
    Ok(())
}

#[path = "scale_test.rs"]
mod scale_test;
