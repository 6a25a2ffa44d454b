// chromaconv/src/utils.rs

use crate::error::DecodeError;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Fill `buf` from `reader`, tolerating short reads from the underlying
/// source. Returns the number of bytes placed in `buf`: the full length for
/// a complete record, 0 for a clean end of stream, or anything in between
/// when the stream ends inside a record.
pub fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Open an input file for buffered reading, checking existence up front so a
/// bad path is reported as such rather than as a generic open failure.
pub fn open_input(path: &Path) -> Result<BufReader<File>, DecodeError> {
    if !path.exists() {
        return Err(DecodeError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Default output path for single-file converters: `.csv` appended to the
/// full input filename.
pub fn csv_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".csv");
    PathBuf::from(name)
}

/// Round to 4 decimal places, matching the precision the CSV output carries.
pub fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

#[path = "utils_test.rs"]
mod utils_test;
