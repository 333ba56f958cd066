use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset has no examples")]
    Empty,

    #[error("{partition} partition has {inputs} inputs but {labels} labels")]
    CountMismatch {
        partition: &'static str,
        inputs: usize,
        labels: usize,
    },

    #[error("{partition} input {index} has {actual} values, expected {expected}")]
    InputSize {
        partition: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{partition} label {index} has {actual} values, expected {expected}")]
    LabelSize {
        partition: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("bad magic number {found:#010x}, expected {expected:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("image dimensions {rows}x{cols} with {count} items are empty or overflow")]
    BadDimensions { count: usize, rows: usize, cols: usize },

    #[error("file ended before all declared items were read")]
    Truncated,

    #[error("label {label} is outside 0..{classes}")]
    LabelOutOfRange { label: u8, classes: usize },

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
