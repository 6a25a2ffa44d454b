// chromaconv/src/error.rs
//
// Decode error taxonomy shared by all three converters.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding an instrument output file.
///
/// Every variant aborts the conversion; no converter retries or emits a
/// partial output file.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// An input path was checked before any read began and does not exist.
    #[error("input file {} does not exist", path.display())]
    MissingInput { path: PathBuf },

    /// The stream ended inside a fixed-width record. A zero-length read is a
    /// clean end of stream; anything between 1 and the record size is file
    /// corruption and must not be silently dropped.
    #[error("truncated {record} record at end of stream ({got} of {expected} bytes)")]
    TruncatedRecord {
        record: &'static str,
        expected: usize,
        got: usize,
    },

    /// The observation stream and the declared scan counts disagree: either
    /// a scan declared more pairs than remain, or pairs were left over after
    /// the last scan.
    #[error(
        "scan counts declare {declared} observation pairs but the stream holds {available}"
    )]
    StreamMismatch { declared: usize, available: usize },

    /// The file is smaller than its fixed header and footer allow.
    #[error("file too small for the fixed layout (need at least {expected} bytes, found {actual})")]
    TooSmall { expected: u64, actual: u64 },

    /// A scale data row did not start with the expected marker bytes.
    #[error("invalid row marker at offset {offset:#x}")]
    BadRowMarker { offset: u64 },

    /// The scale absorbance factor read from the file is zero and cannot be
    /// used as a divisor.
    #[error("absorbance factor is zero")]
    ZeroFactor,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
