use thiserror::Error;

/// Failures reported by shape-sensitive matrix operations.
///
/// None of these are fatal: the offending operation leaves its operands
/// untouched and the caller decides whether to abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("{op}: incompatible shapes {left:?} and {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("expected {expected} values for a {rows}x{cols} matrix, got {actual}")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix dimensions must be at least 1x1, got {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },

    #[error("{op}: expected {expected} layers, got {actual}")]
    LayerCount {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
