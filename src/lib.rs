pub mod error;
pub mod matrix;
pub mod pair_stream;
pub mod pear;
pub mod scale;
pub mod scan_index;
pub mod sixtysix;
pub mod utils;
