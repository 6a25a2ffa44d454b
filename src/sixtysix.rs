// chromaconv/src/sixtysix.rs
//
// Driver for the paired sixtysix format. Both files are decoded to
// completion and the matrix is assembled fully in memory before the output
// file is created, so a decode failure never leaves a partial CSV behind.

use crate::matrix;
use crate::pair_stream::PairStreamReader;
use crate::scan_index::ScanIndexReader;
use crate::utils::open_input;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decode a scan index / observation stream pair and write the dense matrix
/// as CSV to `output`.
pub fn convert_to_csv(a_path: &Path, b_path: &Path, output: &Path) -> Result<()> {
    let a_file = open_input(a_path)?;
    let b_file = open_input(b_path)?;

    let scans = ScanIndexReader::new(a_file)
        .read_all()
        .with_context(|| format!("decoding scan index {}", a_path.display()))?;
    log::debug!("{}: {} scan records", a_path.display(), scans.len());

    let pairs = PairStreamReader::new(b_file)
        .read_all()
        .with_context(|| format!("decoding observation stream {}", b_path.display()))?;
    log::debug!("{}: {} observation pairs", b_path.display(), pairs.len());

    let matrix = matrix::assemble(&scans, &pairs).with_context(|| {
        format!(
            "correlating {} with {}",
            a_path.display(),
            b_path.display()
        )
    })?;
    log::debug!(
        "assembled {} rows over {} distinct keys",
        matrix.rows.len(),
        matrix.keys.len()
    );

    let mut writer = BufWriter::new(
        File::create(output)
            .with_context(|| format!("creating output file {}", output.display()))?,
    );
    matrix
        .write_csv(&mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("writing {}", output.display()))?;

    log::info!("{} written successfully", output.display());
    Ok(())
}
